use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::events::handlers;
use crate::features::events::services::EventService;

/// Public event routes (no authentication required)
pub fn public_routes(service: Arc<EventService>) -> Router {
    Router::new()
        .route("/api/v1/event", get(handlers::list_events))
        .with_state(service)
}

/// Protected event routes (require JWT authentication)
pub fn protected_routes(service: Arc<EventService>) -> Router {
    Router::new()
        .route("/api/v1/event", post(handlers::create_event))
        .route(
            "/api/v1/event/{id}",
            get(handlers::get_event)
                .put(handlers::update_event)
                .delete(handlers::delete_event),
        )
        .route("/api/v1/event/rate/{id}", get(handlers::get_event_rate))
        .with_state(service)
}
