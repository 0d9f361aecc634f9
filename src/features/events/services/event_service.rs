//! Event orchestration.
//!
//! Create and update run as one transaction spanning the event row, its
//! dates, its venues and any geo rows those venues pull in. A failure
//! anywhere in the cascade rolls the transaction back and surfaces as
//! `BadRequest`, so a client never observes a partially written event.

use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::events::dtos::{
    CreateEventDto, CreateVenueDto, EventDatesChanges, EventListQuery, EventResponseDto,
    UpdateEventDto,
};
use crate::features::events::models::{
    BookingCount, DateRange, Event, EventStatus, GenreRef, OrganizerRef,
};
use crate::features::events::services::target::pick_target;
use crate::features::events::services::{EventDatesService, VenueService};
use crate::shared::constants::EVENT_PAGE_SIZE;
use crate::shared::types::Page;

const EVENT_COLUMNS: &str = "id, name, description, expected_amount, recommended_donation, \
     validate_status, count_of_members, status, concession, genre_id, organizer_id";

pub struct EventService {
    pool: PgPool,
}

impl EventService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== Create ====================

    pub async fn create(&self, dto: CreateEventDto) -> Result<EventResponseDto> {
        self.ensure_genre_exists(dto.genre_id).await?;
        self.ensure_organizer_exists(dto.organizer_id).await?;
        let ranges = dto.date_ranges()?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let created = match Self::insert_event(&mut tx, &dto).await {
            Ok(event) => Self::create_children(&mut tx, event.id, &ranges, &dto.venues)
                .await
                .map(|_| event),
            Err(e) => Err(e),
        };

        let event = match created {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("Event '{}' not created, rolling back: {}", dto.name, e);
                tx.rollback().await.map_err(AppError::Database)?;
                return Err(AppError::BadRequest(e.detail()));
            }
        };

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit event {}: {:?}", event.id, e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Created event {} with {} dates and {} venues",
            event.id,
            ranges.len(),
            dto.venues.len()
        );
        self.get(event.id).await
    }

    async fn insert_event(conn: &mut PgConnection, dto: &CreateEventDto) -> Result<Event> {
        let query = format!(
            "INSERT INTO events \
             (id, name, description, expected_amount, recommended_donation, validate_status, \
              count_of_members, status, concession, genre_id, organizer_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(Uuid::now_v7())
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(dto.expected_amount)
            .bind(dto.recommended_donation)
            .bind(dto.validate_status)
            .bind(dto.count_of_members)
            .bind(dto.status)
            .bind(&dto.concession)
            .bind(dto.genre_id)
            .bind(dto.organizer_id)
            .fetch_one(conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert event '{}': {:?}", dto.name, e);
                AppError::Database(e)
            })
    }

    async fn create_children(
        conn: &mut PgConnection,
        event_id: Uuid,
        ranges: &[DateRange],
        venues: &[CreateVenueDto],
    ) -> Result<()> {
        for range in ranges {
            EventDatesService::create(&mut *conn, event_id, range).await?;
        }
        for venue in venues {
            VenueService::create(&mut *conn, event_id, venue).await?;
        }
        Ok(())
    }

    // ==================== Update ====================

    pub async fn update(&self, id: Uuid, dto: UpdateEventDto) -> Result<EventResponseDto> {
        let mut event = self.find_event(id).await?;
        let date_changes = dto.date_changes()?;
        if let Some(genre_id) = dto.genre_id {
            self.ensure_genre_exists(genre_id).await?;
        }
        if let Some(organizer_id) = dto.organizer_id {
            self.ensure_organizer_exists(organizer_id).await?;
        }
        dto.apply_to(&mut event);

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        if let Err(e) = Self::apply_update(&mut tx, &event, date_changes, &dto).await {
            tracing::warn!("Event {} not updated, rolling back: {}", id, e);
            tx.rollback().await.map_err(AppError::Database)?;
            return Err(match e {
                AppError::NotFound(_) => e,
                other => AppError::BadRequest(other.detail()),
            });
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit event {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        tracing::info!("Updated event {}", id);
        self.get(id).await
    }

    async fn apply_update(
        conn: &mut PgConnection,
        event: &Event,
        date_changes: Option<Vec<EventDatesChanges>>,
        dto: &UpdateEventDto,
    ) -> Result<()> {
        if let Some(changes) = date_changes {
            let mut dates = EventDatesService::list_for_event(&mut *conn, event.id).await?;
            for change in changes {
                let idx = pick_target(&dates, change.id, |d| d.id, "event dates")?;
                change.apply(&mut dates[idx]);
                dates[idx] = EventDatesService::update(&mut *conn, &dates[idx]).await?;
            }
        }

        if let Some(patches) = &dto.venues {
            let mut venues = VenueService::list_for_event(&mut *conn, event.id).await?;
            for patch in patches {
                let idx = pick_target(&venues, patch.id, |v| v.id, "venue")?;
                venues[idx] = VenueService::update(&mut *conn, venues[idx].clone(), patch).await?;
            }
        }

        let query = format!(
            "UPDATE events SET name = $2, description = $3, expected_amount = $4, \
             recommended_donation = $5, validate_status = $6, count_of_members = $7, \
             status = $8, concession = $9, genre_id = $10, organizer_id = $11 \
             WHERE id = $1 RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(event.id)
            .bind(&event.name)
            .bind(&event.description)
            .bind(event.expected_amount)
            .bind(event.recommended_donation)
            .bind(event.validate_status)
            .bind(event.count_of_members)
            .bind(event.status)
            .bind(&event.concession)
            .bind(event.genre_id)
            .bind(event.organizer_id)
            .fetch_one(conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update event {}: {:?}", event.id, e);
                AppError::Database(e)
            })?;

        Ok(())
    }

    // ==================== Delete ====================

    /// Delete the event together with its feedback, bookings, venues and dates.
    /// Geo rows are shared reference data and stay.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.find_event(id).await?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        for table in ["feedback", "bookings"] {
            sqlx::query(&format!("DELETE FROM {table} WHERE event_id = $1"))
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to delete {} of event {}: {:?}", table, id, e);
                    AppError::Database(e)
                })?;
        }
        let venues = VenueService::delete_for_event(&mut tx, id).await?;
        let dates = EventDatesService::delete_for_event(&mut tx, id).await?;

        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete event {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit delete of event {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        tracing::info!("Deleted event {} ({} venues, {} dates)", id, venues, dates);
        Ok(())
    }

    // ==================== Read ====================

    pub async fn get(&self, id: Uuid) -> Result<EventResponseDto> {
        let event = self.find_event(id).await?;
        self.assemble(vec![event])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal(format!("Event {} vanished while loading", id)))
    }

    /// Active events, optionally filtered by name and organizer, together
    /// with the number of matches across all pages.
    ///
    /// Without a page every match is returned.
    pub async fn list(&self, query: &EventListQuery) -> Result<(Vec<EventResponseDto>, i64)> {
        let name_pattern = query
            .name
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));
        let page = query.page.map(|p| Page::new(p, EVENT_PAGE_SIZE));

        let filter = "WHERE status = $1 \
             AND ($2::TEXT IS NULL OR name ILIKE $2) \
             AND ($3::UUID IS NULL OR organizer_id = $3)";

        let total = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM events {filter}"))
            .bind(EventStatus::Active)
            .bind(&name_pattern)
            .bind(query.organizer_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count events: {:?}", e);
                AppError::Database(e)
            })?;

        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM events {filter} \
             ORDER BY name, id \
             LIMIT $4 OFFSET $5"
        );
        let events = sqlx::query_as::<_, Event>(&sql)
            .bind(EventStatus::Active)
            .bind(&name_pattern)
            .bind(query.organizer_id)
            .bind(page.map(|p| p.limit()))
            .bind(page.map(|p| p.offset()))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list events: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((self.assemble(events).await?, total))
    }

    /// Mean feedback rate of an event, `None` when nobody rated it yet
    pub async fn average_rate(&self, id: Uuid) -> Result<Option<f64>> {
        self.find_event(id).await?;

        sqlx::query_scalar::<_, Option<f64>>(
            "SELECT AVG(rate)::FLOAT8 FROM feedback WHERE event_id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to compute rate of event {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn find_event(&self, id: Uuid) -> Result<Event> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch event {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }

    /// Build response DTOs for `events`, loading every related table once
    async fn assemble(&self, events: Vec<Event>) -> Result<Vec<EventResponseDto>> {
        if events.is_empty() {
            return Ok(Vec::new());
        }

        let event_ids: Vec<Uuid> = events.iter().map(|e| e.id).collect();
        let genre_ids: Vec<Uuid> = events.iter().map(|e| e.genre_id).collect();
        let organizer_ids: Vec<Uuid> = events.iter().map(|e| e.organizer_id).collect();

        let mut conn = self.pool.acquire().await.map_err(|e| {
            tracing::error!("Failed to acquire connection: {:?}", e);
            AppError::Database(e)
        })?;

        let genres: HashMap<Uuid, GenreRef> =
            sqlx::query_as::<_, GenreRef>("SELECT id, name FROM genres WHERE id = ANY($1)")
                .bind(&genre_ids)
                .fetch_all(&mut *conn)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to fetch genres: {:?}", e);
                    AppError::Database(e)
                })?
                .into_iter()
                .map(|g| (g.id, g))
                .collect();

        let organizers: HashMap<Uuid, OrganizerRef> = sqlx::query_as::<_, OrganizerRef>(
            "SELECT id, name, logo FROM organizers WHERE id = ANY($1)",
        )
        .bind(&organizer_ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch organizers: {:?}", e);
            AppError::Database(e)
        })?
        .into_iter()
        .map(|o| (o.id, o))
        .collect();

        let bookings: HashMap<Uuid, i64> = sqlx::query_as::<_, BookingCount>(
            "SELECT event_id, COUNT(*) AS count FROM bookings \
             WHERE event_id = ANY($1) GROUP BY event_id",
        )
        .bind(&event_ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count bookings: {:?}", e);
            AppError::Database(e)
        })?
        .into_iter()
        .map(|b| (b.event_id, b.count))
        .collect();

        let mut dates = HashMap::<Uuid, Vec<_>>::new();
        for row in EventDatesService::list_for_events(&mut conn, &event_ids).await? {
            dates.entry(row.event_id).or_default().push(row);
        }

        let mut venues = HashMap::<Uuid, Vec<_>>::new();
        for row in VenueService::details_for_events(&mut conn, &event_ids).await? {
            venues.entry(row.event_id).or_default().push(row);
        }

        events
            .into_iter()
            .map(|event| {
                let genre = genres.get(&event.genre_id).cloned().ok_or_else(|| {
                    AppError::Internal(format!("Genre {} of event {} missing", event.genre_id, event.id))
                })?;
                let organizer = organizers.get(&event.organizer_id).cloned().ok_or_else(|| {
                    AppError::Internal(format!(
                        "Organizer {} of event {} missing",
                        event.organizer_id, event.id
                    ))
                })?;
                let number = bookings.get(&event.id).copied().unwrap_or(0);
                let event_dates = dates.remove(&event.id).unwrap_or_default();
                let event_venues = venues.remove(&event.id).unwrap_or_default();

                Ok(EventResponseDto::from_parts(
                    event,
                    genre,
                    organizer,
                    event_dates,
                    event_venues,
                    number,
                ))
            })
            .collect()
    }

    // ==================== Reference Checks ====================

    async fn ensure_genre_exists(&self, id: Uuid) -> Result<()> {
        self.ensure_exists("genres", id, "Genre not found").await
    }

    async fn ensure_organizer_exists(&self, id: Uuid) -> Result<()> {
        self.ensure_exists("organizers", id, "Organizer not found").await
    }

    async fn ensure_exists(&self, table: &str, id: Uuid, message: &str) -> Result<()> {
        let exists = sqlx::query_scalar::<_, bool>(&format!(
            "SELECT EXISTS(SELECT 1 FROM {table} WHERE id = $1)"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up {} {}: {:?}", table, id, e);
            AppError::Database(e)
        })?;

        if exists {
            Ok(())
        } else {
            Err(AppError::NotFound(message.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::events::dtos::{EventDatesPatchDto, VenuePatchDto};
    use crate::shared::test_helpers::{seed_booking, seed_feedback, seed_genre, seed_organizer};
    use serde_json::{json, Value};

    async fn count(pool: &PgPool, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn payload(pool: &PgPool, overrides: Value) -> CreateEventDto {
        let mut body = json!({
            "name": "Summer Concert",
            "description": "Open air",
            "expectedAmount": 1000,
            "recommendedDonation": 10,
            "validateStatus": "REQUIRED",
            "countOfMembers": 50,
            "status": "ACTIVE",
            "concession": "students",
            "genreId": seed_genre(pool).await,
            "organizerId": seed_organizer(pool).await,
            "eventDateTimes": [
                {"startDateTime": "2024-06-01T10:00:00", "endDateTime": "2024-06-01T12:00:00"},
                ["2024-06-02T10:00:00", "2024-06-02T12:00:00"]
            ],
            "venues": [
                {
                    "name": "Hall", "description": "Main", "photos": ["a.jpg"],
                    "address": "1 Main st", "seats": 100,
                    "country": "Russia", "state": "Moscow Oblast", "city": "Moscow"
                },
                {
                    "name": "Annex", "description": "Small", "photos": [],
                    "address": "2 Main st", "seats": 20,
                    "country": "Russia", "state": "Moscow Oblast", "city": "Moscow"
                }
            ]
        });
        if let (Some(target), Value::Object(extra)) = (body.as_object_mut(), overrides) {
            target.extend(extra);
        }
        serde_json::from_value(body).unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_create_persists_whole_graph(pool: PgPool) {
        let service = EventService::new(pool.clone());
        let dto = payload(&pool, json!({})).await;

        let event = service.create(dto).await.unwrap();

        assert_eq!(event.event_dates.len(), 2);
        assert_eq!(event.venues.len(), 2);
        assert_eq!(event.number, 0);
        assert_eq!(event.venues[0].city.id, event.venues[1].city.id);
        assert_eq!(count(&pool, "countries").await, 1);
        assert_eq!(count(&pool, "states").await, 1);
        assert_eq!(count(&pool, "cities").await, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_second_event_reuses_committed_geo_rows(pool: PgPool) {
        let service = EventService::new(pool.clone());
        let venue = json!([{
            "name": "Hall", "description": "Main", "photos": [],
            "address": "1 Main st", "seats": 100,
            "country": "Russia", "state": "Moscow Oblast", "city": "Moscow"
        }]);

        let first = service
            .create(payload(&pool, json!({ "name": "First", "venues": venue.clone() })).await)
            .await
            .unwrap();
        let second = service
            .create(payload(&pool, json!({ "name": "Second", "venues": venue })).await)
            .await
            .unwrap();

        assert_eq!(count(&pool, "countries").await, 1);
        assert_eq!(count(&pool, "states").await, 1);
        assert_eq!(count(&pool, "cities").await, 1);
        assert_eq!(count(&pool, "venues").await, 2);
        assert_eq!(first.venues[0].city.id, second.venues[0].city.id);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_create_failing_venue_rolls_back_everything(pool: PgPool) {
        let service = EventService::new(pool.clone());
        let dto = payload(
            &pool,
            json!({
                "venues": [
                    {
                        "name": "Hall", "description": "Main", "photos": [],
                        "address": "1 Main st", "seats": 100,
                        "country": "Russia", "state": "Moscow Oblast", "city": "Moscow"
                    },
                    {
                        "name": "Broken", "description": "No state", "photos": [],
                        "address": "3 Main st", "seats": 5,
                        "country": "Russia", "city": "Moscow"
                    }
                ]
            }),
        )
        .await;

        let result = service.create(dto).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        for table in ["events", "event_dates", "venues", "countries", "states", "cities"] {
            assert_eq!(count(&pool, table).await, 0, "{table} should be empty");
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_create_rejects_malformed_date_before_writing(pool: PgPool) {
        let service = EventService::new(pool.clone());
        let dto = payload(
            &pool,
            json!({
                "eventDateTimes": [
                    ["2024-06-01T10:00:00", "2024-06-01T12:00:00", "2024-06-01T14:00:00"]
                ]
            }),
        )
        .await;

        assert!(matches!(
            service.create(dto).await,
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(count(&pool, "events").await, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_create_missing_required_scalar_is_bad_request(pool: PgPool) {
        let service = EventService::new(pool.clone());
        let dto = payload(
            &pool,
            json!({
                "venues": [{
                    "name": "No seats", "description": "x", "photos": [], "address": "y",
                    "country": "Russia", "state": "Moscow Oblast", "city": "Moscow"
                }]
            }),
        )
        .await;

        assert!(matches!(
            service.create(dto).await,
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(count(&pool, "events").await, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_create_with_unknown_genre_is_not_found(pool: PgPool) {
        let service = EventService::new(pool.clone());
        let dto = payload(&pool, json!({ "genreId": Uuid::now_v7() })).await;

        assert!(matches!(
            service.create(dto).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_create_checks_genre_before_parsing_dates(pool: PgPool) {
        let service = EventService::new(pool.clone());
        let dto = payload(
            &pool,
            json!({
                "genreId": Uuid::now_v7(),
                "eventDateTimes": [["2024-06-01T10:00:00"]]
            }),
        )
        .await;

        assert!(matches!(
            service.create(dto).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(count(&pool, "events").await, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_update_targets_dates_by_id(pool: PgPool) {
        let service = EventService::new(pool.clone());
        let event = service.create(payload(&pool, json!({})).await).await.unwrap();
        let second = event.event_dates[1].id;

        let updated = service
            .update(
                event.id,
                UpdateEventDto {
                    name: Some("Renamed".to_string()),
                    event_date_times: Some(vec![EventDatesPatchDto {
                        id: Some(second),
                        end_date_time: Some("2024-06-02T18:00:00".to_string()),
                        ..Default::default()
                    }]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.event_dates[0], event.event_dates[0]);
        assert_eq!(
            updated.event_dates[1].end_date_time.to_string(),
            "2024-06-02 18:00:00"
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_update_ambiguous_venue_changes_nothing(pool: PgPool) {
        let service = EventService::new(pool.clone());
        let event = service.create(payload(&pool, json!({})).await).await.unwrap();

        let result = service
            .update(
                event.id,
                UpdateEventDto {
                    name: Some("Renamed".to_string()),
                    venues: Some(vec![VenuePatchDto {
                        seats: Some(1),
                        ..Default::default()
                    }]),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        let reloaded = service.get(event.id).await.unwrap();
        assert_eq!(reloaded, event);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_update_moves_venue_to_new_city(pool: PgPool) {
        let service = EventService::new(pool.clone());
        let event = service.create(payload(&pool, json!({})).await).await.unwrap();
        let annex = &event.venues[1];

        let updated = service
            .update(
                event.id,
                UpdateEventDto {
                    venues: Some(vec![VenuePatchDto {
                        id: Some(annex.id),
                        city: Some("Podolsk".to_string()),
                        ..Default::default()
                    }]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.venues[0].city.name, "Moscow");
        assert_eq!(updated.venues[1].city.name, "Podolsk");
        assert_eq!(updated.venues[1].city.state.name, "Moscow Oblast");
        assert_eq!(count(&pool, "cities").await, 2);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_update_unknown_child_id_is_not_found(pool: PgPool) {
        let service = EventService::new(pool.clone());
        let event = service.create(payload(&pool, json!({})).await).await.unwrap();

        let result = service
            .update(
                event.id,
                UpdateEventDto {
                    event_date_times: Some(vec![EventDatesPatchDto {
                        id: Some(Uuid::now_v7()),
                        ..Default::default()
                    }]),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_delete_removes_dependents_but_keeps_geo(pool: PgPool) {
        let service = EventService::new(pool.clone());
        let event = service.create(payload(&pool, json!({})).await).await.unwrap();
        seed_booking(&pool, event.id).await;
        seed_feedback(&pool, event.id, 4).await;

        service.delete(event.id).await.unwrap();

        for table in ["events", "event_dates", "venues", "bookings", "feedback"] {
            assert_eq!(count(&pool, table).await, 0, "{table} should be empty");
        }
        assert_eq!(count(&pool, "cities").await, 1);
        assert!(matches!(
            service.delete(event.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_list_filters_active_and_pages(pool: PgPool) {
        let service = EventService::new(pool.clone());
        for i in 0..17 {
            let name = format!("Concert {i:02}");
            service
                .create(payload(&pool, json!({ "name": name })).await)
                .await
                .unwrap();
        }
        service
            .create(payload(&pool, json!({ "name": "Concert hidden", "status": "REJECTED" })).await)
            .await
            .unwrap();

        let (all, total) = service.list(&EventListQuery::default()).await.unwrap();
        assert_eq!(all.len(), 17);
        assert_eq!(total, 17);
        assert!(all.iter().all(|e| e.status == EventStatus::Active));

        let (second_page, total) = service
            .list(&EventListQuery {
                page: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(second_page.len(), 2);
        assert_eq!(total, 17);
        assert_eq!(second_page[0].name, "Concert 15");

        let (filtered, _) = service
            .list(&EventListQuery {
                name: Some("cert 0".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(filtered.len(), 10);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_list_name_filter_is_not_trimmed(pool: PgPool) {
        let service = EventService::new(pool.clone());
        for name in ["Solo", "Two Words"] {
            service
                .create(payload(&pool, json!({ "name": name })).await)
                .await
                .unwrap();
        }

        let (matched, total) = service
            .list(&EventListQuery {
                name: Some(" ".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(total, 1);
        assert_eq!(matched[0].name, "Two Words");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_average_rate_and_booking_count(pool: PgPool) {
        let service = EventService::new(pool.clone());
        let event = service.create(payload(&pool, json!({})).await).await.unwrap();

        assert_eq!(service.average_rate(event.id).await.unwrap(), None);

        seed_feedback(&pool, event.id, 4).await;
        seed_feedback(&pool, event.id, 5).await;
        seed_booking(&pool, event.id).await;

        assert_eq!(service.average_rate(event.id).await.unwrap(), Some(4.5));
        assert_eq!(service.get(event.id).await.unwrap().number, 1);
    }
}
