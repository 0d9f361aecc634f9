use sqlx::FromRow;
use uuid::Uuid;

/// Database model for venue
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Venue {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub photos: Vec<String>,
    pub address: String,
    pub seats: i32,
    pub country_id: Uuid,
    pub state_id: Uuid,
    pub city_id: Uuid,
    pub event_id: Uuid,
}

/// Venue joined with its city → state → country chain
#[derive(Debug, Clone, FromRow)]
pub struct VenueDetail {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub photos: Vec<String>,
    pub address: String,
    pub seats: i32,
    pub event_id: Uuid,
    pub city_id: Uuid,
    pub city_name: String,
    pub state_id: Uuid,
    pub state_name: String,
    pub country_id: Uuid,
    pub country_name: String,
}
