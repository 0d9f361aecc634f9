use sqlx::PgConnection;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::events::models::{DateRange, EventDates};

const EVENT_DATES_COLUMNS: &str = "id, start_date_time, end_date_time, event_id";

/// Occurrence windows of an event. Runs on the caller's connection.
pub struct EventDatesService;

impl EventDatesService {
    pub async fn create(
        conn: &mut PgConnection,
        event_id: Uuid,
        range: &DateRange,
    ) -> Result<EventDates> {
        let query = format!(
            "INSERT INTO event_dates (id, start_date_time, end_date_time, event_id) \
             VALUES ($1, $2, $3, $4) RETURNING {EVENT_DATES_COLUMNS}"
        );
        sqlx::query_as::<_, EventDates>(&query)
            .bind(Uuid::now_v7())
            .bind(range.start)
            .bind(range.end)
            .bind(event_id)
            .fetch_one(conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create event dates for {}: {:?}", event_id, e);
                AppError::Database(e)
            })
    }

    /// Persist the current bounds of `dates`
    pub async fn update(conn: &mut PgConnection, dates: &EventDates) -> Result<EventDates> {
        let query = format!(
            "UPDATE event_dates SET start_date_time = $2, end_date_time = $3 \
             WHERE id = $1 RETURNING {EVENT_DATES_COLUMNS}"
        );
        sqlx::query_as::<_, EventDates>(&query)
            .bind(dates.id)
            .bind(dates.start_date_time)
            .bind(dates.end_date_time)
            .fetch_optional(conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update event dates {}: {:?}", dates.id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound("Event dates not found".to_string()))
    }

    /// Rows of one event in creation order
    pub async fn list_for_event(conn: &mut PgConnection, event_id: Uuid) -> Result<Vec<EventDates>> {
        Self::list_for_events(conn, &[event_id]).await
    }

    pub async fn list_for_events(
        conn: &mut PgConnection,
        event_ids: &[Uuid],
    ) -> Result<Vec<EventDates>> {
        let query = format!(
            "SELECT {EVENT_DATES_COLUMNS} FROM event_dates \
             WHERE event_id = ANY($1) ORDER BY id"
        );
        sqlx::query_as::<_, EventDates>(&query)
            .bind(event_ids)
            .fetch_all(conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch event dates: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn delete_for_event(conn: &mut PgConnection, event_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM event_dates WHERE event_id = $1")
            .bind(event_id)
            .execute(conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete event dates of {}: {:?}", event_id, e);
                AppError::Database(e)
            })?;
        Ok(result.rows_affected())
    }
}
