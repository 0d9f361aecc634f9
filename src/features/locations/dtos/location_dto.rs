use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::locations::models::{CityDetail, Country, StateDetail};

/// Query parameters for listing countries
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CountryListQuery {
    /// Search by name (case-insensitive, partial match)
    #[param(example = "rus")]
    pub search: Option<String>,
}

/// Query parameters for listing states
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StateListQuery {
    /// Restrict to one country
    pub country_id: Option<Uuid>,
    /// Search by name (case-insensitive, partial match)
    pub search: Option<String>,
}

/// Query parameters for listing cities
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CityListQuery {
    /// Restrict to one state
    pub state_id: Option<Uuid>,
    /// Search by name (case-insensitive, partial match)
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountryResponseDto {
    pub id: Uuid,
    pub name: String,
}

impl From<Country> for CountryResponseDto {
    fn from(country: Country) -> Self {
        Self {
            id: country.id,
            name: country.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StateResponseDto {
    pub id: Uuid,
    pub name: String,
    pub country: CountryResponseDto,
}

impl From<StateDetail> for StateResponseDto {
    fn from(state: StateDetail) -> Self {
        Self {
            id: state.id,
            name: state.name,
            country: CountryResponseDto {
                id: state.country_id,
                name: state.country_name,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CityResponseDto {
    pub id: Uuid,
    pub name: String,
    pub state: StateResponseDto,
}

impl From<CityDetail> for CityResponseDto {
    fn from(city: CityDetail) -> Self {
        Self {
            id: city.id,
            name: city.name,
            state: StateResponseDto {
                id: city.state_id,
                name: city.state_name,
                country: CountryResponseDto {
                    id: city.country_id,
                    name: city.country_name,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_response_nests_parent_chain() {
        let (country_id, state_id, city_id) = (Uuid::now_v7(), Uuid::now_v7(), Uuid::now_v7());
        let dto: CityResponseDto = CityDetail {
            id: city_id,
            name: "Moscow".to_string(),
            state_id,
            state_name: "Moscow Oblast".to_string(),
            country_id,
            country_name: "Russia".to_string(),
        }
        .into();

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["name"], "Moscow");
        assert_eq!(json["state"]["name"], "Moscow Oblast");
        assert_eq!(json["state"]["country"]["name"], "Russia");
        assert_eq!(json["state"]["country"]["id"], country_id.to_string());
    }

    #[test]
    fn test_state_list_query_reads_camel_case() {
        let id = Uuid::now_v7();
        let query: StateListQuery =
            serde_json::from_value(serde_json::json!({ "countryId": id })).unwrap();
        assert_eq!(query.country_id, Some(id));
        assert!(query.search.is_none());
    }
}
