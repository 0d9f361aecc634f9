use sqlx::FromRow;
use uuid::Uuid;

/// City row, unique by name within its state
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct City {
    pub id: Uuid,
    pub name: String,
    pub state_id: Uuid,
}

/// City joined with the rest of its geo parent chain
#[derive(Debug, Clone, FromRow)]
pub struct CityDetail {
    pub id: Uuid,
    pub name: String,
    pub state_id: Uuid,
    pub state_name: String,
    pub country_id: Uuid,
    pub country_name: String,
}
