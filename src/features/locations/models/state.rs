use sqlx::FromRow;
use uuid::Uuid;

/// State (region/oblast) row, unique by name within its country
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct State {
    pub id: Uuid,
    pub name: String,
    pub country_id: Uuid,
}

/// State joined with its country
#[derive(Debug, Clone, FromRow)]
pub struct StateDetail {
    pub id: Uuid,
    pub name: String,
    pub country_id: Uuid,
    pub country_name: String,
}
