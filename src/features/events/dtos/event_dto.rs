use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::core::error::{AppError, Result};
use crate::features::events::models::{
    DateRange, Event, EventDates, EventStatus, GenreRef, OrganizerRef, ValidateStatus, Venue,
    VenueDetail,
};
use crate::features::locations::dtos::CityResponseDto;
use crate::features::locations::models::CityDetail;

fn non_negative(value: &Decimal) -> std::result::Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("non_negative").with_message("must not be negative".into()));
    }
    Ok(())
}

// ==================== Date Parsing ====================

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 date or datetime into a naive timestamp.
///
/// A bare date means midnight. Values carrying an offset are converted to
/// UTC before the offset is dropped.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_utc());
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| AppError::BadRequest(format!("Invalid ISO-8601 datetime: '{}'", value)))
}

fn datetime_from_value(value: &Value) -> Result<NaiveDateTime> {
    match value {
        Value::String(s) => parse_datetime(s),
        other => Err(AppError::BadRequest(format!(
            "Expected an ISO-8601 datetime string, got {}",
            other
        ))),
    }
}

/// One `eventDateTimes` entry: `{"startDateTime", "endDateTime"}` or `[start, end]`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DateRangeInput {
    Pair(Vec<Value>),
    Object(Map<String, Value>),
}

impl DateRangeInput {
    /// Validate the entry shape and parse both bounds.
    ///
    /// Anything other than exactly two values is rejected.
    pub fn parse(&self) -> Result<DateRange> {
        let (start, end) = match self {
            DateRangeInput::Pair(values) => {
                if values.len() != 2 {
                    return Err(wrong_arity(values.len()));
                }
                (&values[0], &values[1])
            }
            DateRangeInput::Object(map) => {
                if map.len() != 2 {
                    return Err(wrong_arity(map.len()));
                }
                match (map.get("startDateTime"), map.get("endDateTime")) {
                    (Some(start), Some(end)) => (start, end),
                    _ => {
                        return Err(AppError::BadRequest(
                            "eventDateTimes entries must have startDateTime and endDateTime"
                                .to_string(),
                        ))
                    }
                }
            }
        };

        Ok(DateRange {
            start: datetime_from_value(start)?,
            end: datetime_from_value(end)?,
        })
    }
}

fn wrong_arity(found: usize) -> AppError {
    AppError::BadRequest(format!(
        "Each eventDateTimes entry must hold exactly 2 datetime values, got {}",
        found
    ))
}

// ==================== Request DTOs ====================

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVenueDto {
    #[validate(length(min = 1, max = 255, message = "Venue name must be 1-255 characters"))]
    #[schema(example = "Main Hall")]
    pub name: String,

    pub description: Option<String>,

    /// Photo URLs, in display order
    pub photos: Option<Vec<String>>,

    #[validate(length(max = 255))]
    pub address: Option<String>,

    #[validate(range(min = 0, message = "Seats must not be negative"))]
    pub seats: Option<i32>,

    #[schema(example = "Russia")]
    pub country: Option<String>,
    #[schema(example = "Moscow Oblast")]
    pub state: Option<String>,
    #[schema(example = "Moscow")]
    pub city: Option<String>,
}

impl CreateVenueDto {
    /// The country, state and city names. All three are required.
    pub fn location(&self) -> Result<(&str, &str, &str)> {
        match (
            self.country.as_deref(),
            self.state.as_deref(),
            self.city.as_deref(),
        ) {
            (Some(country), Some(state), Some(city)) => Ok((country, state, city)),
            _ => Err(AppError::BadRequest(format!(
                "Venue '{}' must specify country, state and city",
                self.name
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    #[schema(example = "Summer Charity Concert")]
    pub name: String,

    pub description: String,

    #[validate(custom(function = "non_negative"))]
    #[schema(value_type = f64, example = 1000.0)]
    pub expected_amount: Decimal,

    #[validate(custom(function = "non_negative"))]
    #[schema(value_type = f64, example = 10.0)]
    pub recommended_donation: Decimal,

    pub validate_status: ValidateStatus,

    #[validate(range(min = 0, message = "countOfMembers must not be negative"))]
    pub count_of_members: i32,

    pub status: EventStatus,

    #[validate(length(max = 255))]
    pub concession: String,

    pub genre_id: Uuid,
    pub organizer_id: Uuid,

    /// `{"startDateTime", "endDateTime"}` objects or `[start, end]` pairs
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub event_date_times: Vec<DateRangeInput>,

    #[serde(default)]
    #[validate(nested)]
    pub venues: Vec<CreateVenueDto>,
}

impl CreateEventDto {
    /// Parse every date entry up front so a malformed one aborts the request
    /// before anything is written.
    pub fn date_ranges(&self) -> Result<Vec<DateRange>> {
        self.event_date_times
            .iter()
            .map(DateRangeInput::parse)
            .collect()
    }
}

/// Patch for one event-dates row. `id` selects the row; without it the
/// event must have exactly one.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDatesPatchDto {
    pub id: Option<Uuid>,
    #[schema(example = "2024-06-01T10:00:00")]
    pub start_date_time: Option<String>,
    #[schema(example = "2024-06-01T12:00:00")]
    pub end_date_time: Option<String>,
}

/// Parsed form of [`EventDatesPatchDto`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventDatesChanges {
    pub id: Option<Uuid>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl EventDatesPatchDto {
    pub fn changes(&self) -> Result<EventDatesChanges> {
        Ok(EventDatesChanges {
            id: self.id,
            start: self.start_date_time.as_deref().map(parse_datetime).transpose()?,
            end: self.end_date_time.as_deref().map(parse_datetime).transpose()?,
        })
    }
}

impl EventDatesChanges {
    pub fn apply(&self, dates: &mut EventDates) {
        if let Some(start) = self.start {
            dates.start_date_time = start;
        }
        if let Some(end) = self.end {
            dates.end_date_time = end;
        }
    }
}

/// Patch for one venue. `id` selects the venue; without it the event must
/// have exactly one.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VenuePatchDto {
    pub id: Option<Uuid>,

    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    /// Replaces the stored list
    pub photos: Option<Vec<String>>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[validate(range(min = 0))]
    pub seats: Option<i32>,

    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}

impl VenuePatchDto {
    /// Copy the plain (non-geo) fields onto `venue`
    pub fn apply_fields(&self, venue: &mut Venue) {
        if let Some(name) = &self.name {
            venue.name = name.clone();
        }
        if let Some(description) = &self.description {
            venue.description = description.clone();
        }
        if let Some(photos) = &self.photos {
            venue.photos = photos.clone();
        }
        if let Some(address) = &self.address {
            venue.address = address.clone();
        }
        if let Some(seats) = self.seats {
            venue.seats = seats;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,

    #[validate(custom(function = "non_negative"))]
    #[schema(value_type = Option<f64>)]
    pub expected_amount: Option<Decimal>,

    #[validate(custom(function = "non_negative"))]
    #[schema(value_type = Option<f64>)]
    pub recommended_donation: Option<Decimal>,

    pub validate_status: Option<ValidateStatus>,

    #[validate(range(min = 0, message = "countOfMembers must not be negative"))]
    pub count_of_members: Option<i32>,

    pub status: Option<EventStatus>,

    #[validate(length(max = 255))]
    pub concession: Option<String>,

    pub genre_id: Option<Uuid>,
    pub organizer_id: Option<Uuid>,

    pub event_date_times: Option<Vec<EventDatesPatchDto>>,

    #[validate(nested)]
    pub venues: Option<Vec<VenuePatchDto>>,
}

impl UpdateEventDto {
    /// Copy every present scalar field onto `event`
    pub fn apply_to(&self, event: &mut Event) {
        if let Some(name) = &self.name {
            event.name = name.clone();
        }
        if let Some(description) = &self.description {
            event.description = description.clone();
        }
        if let Some(amount) = self.expected_amount {
            event.expected_amount = amount;
        }
        if let Some(donation) = self.recommended_donation {
            event.recommended_donation = donation;
        }
        if let Some(validate_status) = self.validate_status {
            event.validate_status = validate_status;
        }
        if let Some(count) = self.count_of_members {
            event.count_of_members = count;
        }
        if let Some(status) = self.status {
            event.status = status;
        }
        if let Some(concession) = &self.concession {
            event.concession = concession.clone();
        }
        if let Some(genre_id) = self.genre_id {
            event.genre_id = genre_id;
        }
        if let Some(organizer_id) = self.organizer_id {
            event.organizer_id = organizer_id;
        }
    }

    pub fn date_changes(&self) -> Result<Option<Vec<EventDatesChanges>>> {
        self.event_date_times
            .as_ref()
            .map(|patches| patches.iter().map(EventDatesPatchDto::changes).collect())
            .transpose()
    }
}

/// Query parameters for listing events
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct EventListQuery {
    /// Case-insensitive substring of the event name
    pub name: Option<String>,
    pub organizer_id: Option<Uuid>,
    /// 1-based page; omit to get every matching event
    #[param(minimum = 1)]
    pub page: Option<i64>,
}

// ==================== Response DTOs ====================

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenreSummaryDto {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerSummaryDto {
    pub id: Uuid,
    pub name: String,
    pub logo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDatesResponseDto {
    pub id: Uuid,
    #[schema(value_type = String, example = "2024-06-01T10:00:00")]
    pub start_date_time: NaiveDateTime,
    #[schema(value_type = String, example = "2024-06-01T12:00:00")]
    pub end_date_time: NaiveDateTime,
}

impl From<EventDates> for EventDatesResponseDto {
    fn from(dates: EventDates) -> Self {
        Self {
            id: dates.id,
            start_date_time: dates.start_date_time,
            end_date_time: dates.end_date_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventVenueResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub photos: Vec<String>,
    pub seats: i32,
    pub address: String,
    pub city: CityResponseDto,
}

impl From<VenueDetail> for EventVenueResponseDto {
    fn from(venue: VenueDetail) -> Self {
        Self {
            id: venue.id,
            name: venue.name,
            description: venue.description,
            photos: venue.photos,
            seats: venue.seats,
            address: venue.address,
            city: CityDetail {
                id: venue.city_id,
                name: venue.city_name,
                state_id: venue.state_id,
                state_name: venue.state_name,
                country_id: venue.country_id,
                country_name: venue.country_name,
            }
            .into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub expected_amount: f64,
    pub recommended_donation: f64,
    pub validate_status: ValidateStatus,
    pub count_of_members: i32,
    pub status: EventStatus,
    pub concession: String,
    pub genre: GenreSummaryDto,
    pub organizer: OrganizerSummaryDto,
    pub event_dates: Vec<EventDatesResponseDto>,
    pub venues: Vec<EventVenueResponseDto>,
    /// Number of bookings made for the event
    pub number: i64,
}

impl EventResponseDto {
    pub fn from_parts(
        event: Event,
        genre: GenreRef,
        organizer: OrganizerRef,
        dates: Vec<EventDates>,
        venues: Vec<VenueDetail>,
        number: i64,
    ) -> Self {
        Self {
            id: event.id,
            name: event.name,
            description: event.description,
            expected_amount: event.expected_amount.to_f64().unwrap_or_default(),
            recommended_donation: event.recommended_donation.to_f64().unwrap_or_default(),
            validate_status: event.validate_status,
            count_of_members: event.count_of_members,
            status: event.status,
            concession: event.concession,
            genre: GenreSummaryDto {
                id: genre.id,
                name: genre.name,
            },
            organizer: OrganizerSummaryDto {
                id: organizer.id,
                name: organizer.name,
                logo: organizer.logo,
            },
            event_dates: dates.into_iter().map(Into::into).collect(),
            venues: venues.into_iter().map(Into::into).collect(),
            number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventRateResponseDto {
    /// Mean feedback rate, `null` while the event has no feedback
    pub average_rate: Option<f64>,
}
