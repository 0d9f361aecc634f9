use chrono::NaiveDateTime;
use sqlx::FromRow;
use uuid::Uuid;

/// One occurrence window of an event (timezone-naive)
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EventDates {
    pub id: Uuid,
    pub start_date_time: NaiveDateTime,
    pub end_date_time: NaiveDateTime,
    pub event_id: Uuid,
}

/// A validated start/end pair, not yet persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}
