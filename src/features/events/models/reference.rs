//! Read-only projections of rows owned by other parts of the platform.

use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct GenreRef {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct OrganizerRef {
    pub id: Uuid,
    pub name: String,
    pub logo: String,
}

/// Number of bookings made for one event
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct BookingCount {
    pub event_id: Uuid,
    pub count: i64,
}
