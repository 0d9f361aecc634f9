use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::locations::dtos::{
    CityListQuery, CityResponseDto, CountryListQuery, CountryResponseDto, StateListQuery,
    StateResponseDto,
};
use crate::features::locations::services::LocationService;
use crate::shared::types::ApiResponse;

// ==================== Country Handlers ====================

/// List countries
#[utoipa::path(
    get,
    path = "/api/v1/country",
    params(CountryListQuery),
    responses(
        (status = 200, description = "List of countries", body = ApiResponse<Vec<CountryResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn list_countries(
    _user: AuthenticatedUser,
    State(service): State<Arc<LocationService>>,
    Query(query): Query<CountryListQuery>,
) -> Result<Json<ApiResponse<Vec<CountryResponseDto>>>> {
    let countries = service.list_countries(query.search.as_deref()).await?;
    let dtos: Vec<CountryResponseDto> = countries.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Get a country by id
#[utoipa::path(
    get,
    path = "/api/v1/country/{id}",
    params(("id" = Uuid, Path, description = "Country id")),
    responses(
        (status = 200, description = "Country details", body = ApiResponse<CountryResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Country not found")
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn get_country(
    _user: AuthenticatedUser,
    State(service): State<Arc<LocationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CountryResponseDto>>> {
    let country = service.get_country(id).await?;
    Ok(Json(ApiResponse::success(Some(country.into()), None, None)))
}

// ==================== State Handlers ====================

/// List states, optionally within one country
#[utoipa::path(
    get,
    path = "/api/v1/state",
    params(StateListQuery),
    responses(
        (status = 200, description = "List of states", body = ApiResponse<Vec<StateResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn list_states(
    _user: AuthenticatedUser,
    State(service): State<Arc<LocationService>>,
    Query(query): Query<StateListQuery>,
) -> Result<Json<ApiResponse<Vec<StateResponseDto>>>> {
    let states = service
        .list_states(query.country_id, query.search.as_deref())
        .await?;
    let dtos: Vec<StateResponseDto> = states.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Get a state by id
#[utoipa::path(
    get,
    path = "/api/v1/state/{id}",
    params(("id" = Uuid, Path, description = "State id")),
    responses(
        (status = 200, description = "State with its country", body = ApiResponse<StateResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "State not found")
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn get_state(
    _user: AuthenticatedUser,
    State(service): State<Arc<LocationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<StateResponseDto>>> {
    let state = service.get_state(id).await?;
    Ok(Json(ApiResponse::success(Some(state.into()), None, None)))
}

// ==================== City Handlers ====================

/// List cities, optionally within one state
#[utoipa::path(
    get,
    path = "/api/v1/city",
    params(CityListQuery),
    responses(
        (status = 200, description = "List of cities", body = ApiResponse<Vec<CityResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn list_cities(
    _user: AuthenticatedUser,
    State(service): State<Arc<LocationService>>,
    Query(query): Query<CityListQuery>,
) -> Result<Json<ApiResponse<Vec<CityResponseDto>>>> {
    let cities = service
        .list_cities(query.state_id, query.search.as_deref())
        .await?;
    let dtos: Vec<CityResponseDto> = cities.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Get a city by id
#[utoipa::path(
    get,
    path = "/api/v1/city/{id}",
    params(("id" = Uuid, Path, description = "City id")),
    responses(
        (status = 200, description = "City with its state and country", body = ApiResponse<CityResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "City not found")
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn get_city(
    _user: AuthenticatedUser,
    State(service): State<Arc<LocationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CityResponseDto>>> {
    let city = service.get_city(id).await?;
    Ok(Json(ApiResponse::success(Some(city.into()), None, None)))
}
