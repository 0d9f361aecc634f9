//! Venue rows and their geo chain.
//!
//! Creation resolves the full country → state → city chain by name. An
//! update resolves only the levels it names, top-down, and keeps the chain
//! consistent: when a parent moves and the child level is not named, the
//! child's current name is re-resolved under the new parent.

use sqlx::PgConnection;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::events::dtos::{CreateVenueDto, VenuePatchDto};
use crate::features::events::models::{Venue, VenueDetail};
use crate::features::locations::GeoResolver;

const VENUE_COLUMNS: &str =
    "id, name, description, photos, address, seats, country_id, state_id, city_id, event_id";

const VENUE_DETAIL_SELECT: &str = "SELECT v.id, v.name, v.description, v.photos, v.address, \
     v.seats, v.event_id, ci.id AS city_id, ci.name AS city_name, \
     s.id AS state_id, s.name AS state_name, co.id AS country_id, co.name AS country_name \
     FROM venues v \
     JOIN cities ci ON ci.id = v.city_id \
     JOIN states s ON s.id = v.state_id \
     JOIN countries co ON co.id = v.country_id";

pub struct VenueService;

impl VenueService {
    pub async fn create(
        conn: &mut PgConnection,
        event_id: Uuid,
        dto: &CreateVenueDto,
    ) -> Result<Venue> {
        let (country, state, city) = dto.location()?;
        let chain = GeoResolver::resolve(&mut *conn, country, state, city).await?;

        let query = format!(
            "INSERT INTO venues \
             (id, name, description, photos, address, seats, country_id, state_id, city_id, event_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {VENUE_COLUMNS}"
        );
        sqlx::query_as::<_, Venue>(&query)
            .bind(Uuid::now_v7())
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(&dto.photos)
            .bind(&dto.address)
            .bind(dto.seats)
            .bind(chain.country_id)
            .bind(chain.state_id)
            .bind(chain.city_id)
            .bind(event_id)
            .fetch_one(conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create venue '{}': {:?}", dto.name, e);
                AppError::Database(e)
            })
    }

    pub async fn update(
        conn: &mut PgConnection,
        mut venue: Venue,
        patch: &VenuePatchDto,
    ) -> Result<Venue> {
        patch.apply_fields(&mut venue);

        let mut country_moved = false;
        if let Some(name) = &patch.country {
            let country = GeoResolver::country(&mut *conn, name).await?;
            country_moved = country.id != venue.country_id;
            venue.country_id = country.id;
        }

        let state_name = match &patch.state {
            Some(name) => Some(name.clone()),
            None if country_moved => Some(Self::state_name(&mut *conn, venue.state_id).await?),
            None => None,
        };
        let mut state_moved = false;
        if let Some(name) = state_name {
            let state = GeoResolver::state(&mut *conn, &name, venue.country_id).await?;
            state_moved = state.id != venue.state_id;
            venue.state_id = state.id;
        }

        let city_name = match &patch.city {
            Some(name) => Some(name.clone()),
            None if state_moved => Some(Self::city_name(&mut *conn, venue.city_id).await?),
            None => None,
        };
        if let Some(name) = city_name {
            let city = GeoResolver::city(&mut *conn, &name, venue.state_id).await?;
            venue.city_id = city.id;
        }

        let query = format!(
            "UPDATE venues SET name = $2, description = $3, photos = $4, address = $5, \
             seats = $6, country_id = $7, state_id = $8, city_id = $9 \
             WHERE id = $1 RETURNING {VENUE_COLUMNS}"
        );
        sqlx::query_as::<_, Venue>(&query)
            .bind(venue.id)
            .bind(&venue.name)
            .bind(&venue.description)
            .bind(&venue.photos)
            .bind(&venue.address)
            .bind(venue.seats)
            .bind(venue.country_id)
            .bind(venue.state_id)
            .bind(venue.city_id)
            .fetch_optional(conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update venue {}: {:?}", venue.id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound("Venue not found".to_string()))
    }

    /// Venues of one event in creation order
    pub async fn list_for_event(conn: &mut PgConnection, event_id: Uuid) -> Result<Vec<Venue>> {
        let query = format!("SELECT {VENUE_COLUMNS} FROM venues WHERE event_id = $1 ORDER BY id");
        sqlx::query_as::<_, Venue>(&query)
            .bind(event_id)
            .fetch_all(conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch venues of {}: {:?}", event_id, e);
                AppError::Database(e)
            })
    }

    /// Venues of several events, joined with their geo chain
    pub async fn details_for_events(
        conn: &mut PgConnection,
        event_ids: &[Uuid],
    ) -> Result<Vec<VenueDetail>> {
        let query = format!("{VENUE_DETAIL_SELECT} WHERE v.event_id = ANY($1) ORDER BY v.id");
        sqlx::query_as::<_, VenueDetail>(&query)
            .bind(event_ids)
            .fetch_all(conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch venue details: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn delete_for_event(conn: &mut PgConnection, event_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM venues WHERE event_id = $1")
            .bind(event_id)
            .execute(conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete venues of {}: {:?}", event_id, e);
                AppError::Database(e)
            })?;
        Ok(result.rows_affected())
    }

    async fn state_name(conn: &mut PgConnection, state_id: Uuid) -> Result<String> {
        sqlx::query_scalar::<_, String>("SELECT name FROM states WHERE id = $1")
            .bind(state_id)
            .fetch_one(conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch state {}: {:?}", state_id, e);
                AppError::Database(e)
            })
    }

    async fn city_name(conn: &mut PgConnection, city_id: Uuid) -> Result<String> {
        sqlx::query_scalar::<_, String>("SELECT name FROM cities WHERE id = $1")
            .bind(city_id)
            .fetch_one(conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch city {}: {:?}", city_id, e);
                AppError::Database(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::seed_event;
    use sqlx::PgPool;

    fn venue_in(country: &str, state: &str, city: &str) -> CreateVenueDto {
        CreateVenueDto {
            name: "Hall".to_string(),
            description: Some("Main hall".to_string()),
            photos: Some(vec!["a.jpg".to_string()]),
            address: Some("1 Main st".to_string()),
            seats: Some(100),
            country: Some(country.to_string()),
            state: Some(state.to_string()),
            city: Some(city.to_string()),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_city_only_update_stays_in_current_state(pool: PgPool) {
        let event_id = seed_event(&pool).await;
        let mut tx = pool.begin().await.unwrap();

        let venue = VenueService::create(&mut tx, event_id, &venue_in("Russia", "Oblast X", "A"))
            .await
            .unwrap();
        let patch = VenuePatchDto {
            city: Some("B".to_string()),
            ..Default::default()
        };
        let updated = VenueService::update(&mut tx, venue.clone(), &patch)
            .await
            .unwrap();

        let city_b = GeoResolver::city(&mut tx, "B", venue.state_id).await.unwrap();
        assert_eq!(updated.city_id, city_b.id);
        assert_eq!(updated.state_id, venue.state_id);
        assert_eq!(updated.country_id, venue.country_id);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_country_change_carries_state_and_city(pool: PgPool) {
        let event_id = seed_event(&pool).await;
        let mut tx = pool.begin().await.unwrap();

        let venue = VenueService::create(&mut tx, event_id, &venue_in("Russia", "Central", "Town"))
            .await
            .unwrap();
        let patch = VenuePatchDto {
            country: Some("Kazakhstan".to_string()),
            ..Default::default()
        };
        let updated = VenueService::update(&mut tx, venue.clone(), &patch)
            .await
            .unwrap();

        let chain = GeoResolver::resolve(&mut tx, "Kazakhstan", "Central", "Town")
            .await
            .unwrap();
        assert_eq!(updated.country_id, chain.country_id);
        assert_eq!(updated.state_id, chain.state_id);
        assert_eq!(updated.city_id, chain.city_id);
        assert_ne!(updated.state_id, venue.state_id);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_plain_fields_update_leaves_chain(pool: PgPool) {
        let event_id = seed_event(&pool).await;
        let mut tx = pool.begin().await.unwrap();

        let venue = VenueService::create(&mut tx, event_id, &venue_in("Russia", "Central", "Town"))
            .await
            .unwrap();
        let patch = VenuePatchDto {
            seats: Some(20),
            photos: Some(vec![]),
            ..Default::default()
        };
        let updated = VenueService::update(&mut tx, venue.clone(), &patch)
            .await
            .unwrap();

        assert_eq!(updated.seats, 20);
        assert!(updated.photos.is_empty());
        assert_eq!(updated.city_id, venue.city_id);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_create_without_location_is_bad_request(pool: PgPool) {
        let event_id = seed_event(&pool).await;
        let mut tx = pool.begin().await.unwrap();

        let mut dto = venue_in("Russia", "Central", "Town");
        dto.state = None;
        let result = VenueService::create(&mut tx, event_id, &dto).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
