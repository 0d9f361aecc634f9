use sqlx::FromRow;
use uuid::Uuid;

/// Country row. Names are unique.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Country {
    pub id: Uuid,
    pub name: String,
}
