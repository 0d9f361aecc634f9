use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::locations::models::{CityDetail, Country, StateDetail};

const STATE_DETAIL_SELECT: &str = "SELECT s.id, s.name, s.country_id, c.name AS country_name \
     FROM states s JOIN countries c ON c.id = s.country_id";

const CITY_DETAIL_SELECT: &str = "SELECT ci.id, ci.name, ci.state_id, s.name AS state_name, \
     s.country_id, co.name AS country_name \
     FROM cities ci \
     JOIN states s ON s.id = ci.state_id \
     JOIN countries co ON co.id = s.country_id";

/// Read access to the geo reference tables
pub struct LocationService {
    pool: PgPool,
}

/// Lowercased `%term%` pattern, or `None` for an absent/blank search
fn search_pattern(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", s.to_lowercase()))
}

impl LocationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== Country Methods ====================

    pub async fn list_countries(&self, search: Option<&str>) -> Result<Vec<Country>> {
        sqlx::query_as::<_, Country>(
            "SELECT id, name FROM countries \
             WHERE ($1::TEXT IS NULL OR LOWER(name) LIKE $1) \
             ORDER BY name, id",
        )
        .bind(search_pattern(search))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch countries: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn get_country(&self, id: Uuid) -> Result<Country> {
        sqlx::query_as::<_, Country>("SELECT id, name FROM countries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch country {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound("Country not found".to_string()))
    }

    // ==================== State Methods ====================

    pub async fn list_states(
        &self,
        country_id: Option<Uuid>,
        search: Option<&str>,
    ) -> Result<Vec<StateDetail>> {
        let query = format!(
            "{STATE_DETAIL_SELECT} \
             WHERE ($1::UUID IS NULL OR s.country_id = $1) \
               AND ($2::TEXT IS NULL OR LOWER(s.name) LIKE $2) \
             ORDER BY s.name, s.id"
        );
        sqlx::query_as::<_, StateDetail>(&query)
            .bind(country_id)
            .bind(search_pattern(search))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch states: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn get_state(&self, id: Uuid) -> Result<StateDetail> {
        let query = format!("{STATE_DETAIL_SELECT} WHERE s.id = $1");
        sqlx::query_as::<_, StateDetail>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch state {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound("State not found".to_string()))
    }

    // ==================== City Methods ====================

    pub async fn list_cities(
        &self,
        state_id: Option<Uuid>,
        search: Option<&str>,
    ) -> Result<Vec<CityDetail>> {
        let query = format!(
            "{CITY_DETAIL_SELECT} \
             WHERE ($1::UUID IS NULL OR ci.state_id = $1) \
               AND ($2::TEXT IS NULL OR LOWER(ci.name) LIKE $2) \
             ORDER BY ci.name, ci.id"
        );
        sqlx::query_as::<_, CityDetail>(&query)
            .bind(state_id)
            .bind(search_pattern(search))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch cities: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn get_city(&self, id: Uuid) -> Result<CityDetail> {
        let query = format!("{CITY_DETAIL_SELECT} WHERE ci.id = $1");
        sqlx::query_as::<_, CityDetail>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch city {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound("City not found".to_string()))
    }
}
