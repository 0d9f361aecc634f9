use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::locations::handlers;
use crate::features::locations::services::LocationService;

/// Create routes for the locations feature
pub fn routes(service: Arc<LocationService>) -> Router {
    Router::new()
        .route("/api/v1/country", get(handlers::list_countries))
        .route("/api/v1/country/{id}", get(handlers::get_country))
        .route("/api/v1/state", get(handlers::list_states))
        .route("/api/v1/state/{id}", get(handlers::get_state))
        .route("/api/v1/city", get(handlers::list_cities))
        .route("/api/v1/city/{id}", get(handlers::get_city))
        .with_state(service)
}
