use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::events::dtos::{
    CreateEventDto, EventListQuery, EventRateResponseDto, EventResponseDto, UpdateEventDto,
};
use crate::features::events::services::EventService;
use crate::shared::types::{ApiResponse, Meta};

/// List active events
#[utoipa::path(
    get,
    path = "/api/v1/event",
    params(EventListQuery),
    responses(
        (status = 200, description = "Active events", body = ApiResponse<Vec<EventResponseDto>>)
    ),
    tag = "events"
)]
pub async fn list_events(
    State(service): State<Arc<EventService>>,
    Query(query): Query<EventListQuery>,
) -> Result<Json<ApiResponse<Vec<EventResponseDto>>>> {
    let (events, total) = service.list(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(events),
        None,
        Some(Meta { total }),
    )))
}

/// Create an event with its dates and venues
#[utoipa::path(
    post,
    path = "/api/v1/event",
    request_body = CreateEventDto,
    responses(
        (status = 201, description = "Event created", body = ApiResponse<EventResponseDto>),
        (status = 400, description = "Invalid payload; nothing was written"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Genre or organizer not found")
    ),
    tag = "events",
    security(("bearer_auth" = []))
)]
pub async fn create_event(
    _user: AuthenticatedUser,
    State(service): State<Arc<EventService>>,
    AppJson(dto): AppJson<CreateEventDto>,
) -> Result<(StatusCode, Json<ApiResponse<EventResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let event = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(event), None, None)),
    ))
}

/// Get an event by id
#[utoipa::path(
    get,
    path = "/api/v1/event/{id}",
    params(("id" = Uuid, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event details", body = ApiResponse<EventResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "events",
    security(("bearer_auth" = []))
)]
pub async fn get_event(
    _user: AuthenticatedUser,
    State(service): State<Arc<EventService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EventResponseDto>>> {
    let event = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(event), None, None)))
}

/// Update an event, its dates and its venues
#[utoipa::path(
    put,
    path = "/api/v1/event/{id}",
    params(("id" = Uuid, Path, description = "Event id")),
    request_body = UpdateEventDto,
    responses(
        (status = 200, description = "Event updated", body = ApiResponse<EventResponseDto>),
        (status = 400, description = "Invalid payload; nothing was written"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event, child row, genre or organizer not found")
    ),
    tag = "events",
    security(("bearer_auth" = []))
)]
pub async fn update_event(
    _user: AuthenticatedUser,
    State(service): State<Arc<EventService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateEventDto>,
) -> Result<Json<ApiResponse<EventResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let event = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(event), None, None)))
}

/// Delete an event and everything that hangs off it
#[utoipa::path(
    delete,
    path = "/api/v1/event/{id}",
    params(("id" = Uuid, Path, description = "Event id")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "events",
    security(("bearer_auth" = []))
)]
pub async fn delete_event(
    _user: AuthenticatedUser,
    State(service): State<Arc<EventService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Average feedback rate of an event
#[utoipa::path(
    get,
    path = "/api/v1/event/rate/{id}",
    params(("id" = Uuid, Path, description = "Event id")),
    responses(
        (status = 200, description = "Average rate", body = ApiResponse<EventRateResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "events",
    security(("bearer_auth" = []))
)]
pub async fn get_event_rate(
    _user: AuthenticatedUser,
    State(service): State<Arc<EventService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EventRateResponseDto>>> {
    let average_rate = service.average_rate(id).await?;
    Ok(Json(ApiResponse::success(
        Some(EventRateResponseDto { average_rate }),
        None,
        None,
    )))
}
