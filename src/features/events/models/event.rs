use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Whether attendees must be validated at the door
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "validate_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidateStatus {
    Required,
    Optional,
    NotRequired,
}

/// Event lifecycle status. `Pospond` keeps the persisted spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "event_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Active,
    Approved,
    Pospond,
    Rejected,
}

/// Database model for event
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub expected_amount: Decimal,
    pub recommended_donation: Decimal,
    pub validate_status: ValidateStatus,
    pub count_of_members: i32,
    pub status: EventStatus,
    pub concession: String,
    pub genre_id: Uuid,
    pub organizer_id: Uuid,
}
