use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::events::{dtos as events_dtos, handlers as events_handlers, models as events_models};
use crate::features::locations::{dtos as locations_dtos, handlers as locations_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Events
        events_handlers::list_events,
        events_handlers::create_event,
        events_handlers::get_event,
        events_handlers::update_event,
        events_handlers::delete_event,
        events_handlers::get_event_rate,
        // Locations
        locations_handlers::list_countries,
        locations_handlers::get_country,
        locations_handlers::list_states,
        locations_handlers::get_state,
        locations_handlers::list_cities,
        locations_handlers::get_city,
    ),
    components(
        schemas(
            Meta,
            // Events
            events_models::ValidateStatus,
            events_models::EventStatus,
            events_dtos::CreateEventDto,
            events_dtos::CreateVenueDto,
            events_dtos::UpdateEventDto,
            events_dtos::EventDatesPatchDto,
            events_dtos::VenuePatchDto,
            events_dtos::EventResponseDto,
            events_dtos::GenreSummaryDto,
            events_dtos::OrganizerSummaryDto,
            events_dtos::EventDatesResponseDto,
            events_dtos::EventVenueResponseDto,
            events_dtos::EventRateResponseDto,
            ApiResponse<events_dtos::EventResponseDto>,
            ApiResponse<Vec<events_dtos::EventResponseDto>>,
            ApiResponse<events_dtos::EventRateResponseDto>,
            // Locations
            locations_dtos::CountryResponseDto,
            locations_dtos::StateResponseDto,
            locations_dtos::CityResponseDto,
            ApiResponse<locations_dtos::CountryResponseDto>,
            ApiResponse<Vec<locations_dtos::CountryResponseDto>>,
            ApiResponse<locations_dtos::StateResponseDto>,
            ApiResponse<Vec<locations_dtos::StateResponseDto>>,
            ApiResponse<locations_dtos::CityResponseDto>,
            ApiResponse<Vec<locations_dtos::CityResponseDto>>,
        )
    ),
    tags(
        (name = "events", description = "Events with their dates and venues"),
        (name = "locations", description = "Country, state and city reference data"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Eventer",
        version = "1.0",
        description = "Rest API Eventer",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_event_routes_with_bearer_scheme() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "2.0".to_string(),
            description: "desc".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Custom");
        assert!(doc.paths.paths.contains_key("/api/v1/event"));
        assert!(doc.paths.paths.contains_key("/api/v1/event/rate/{id}"));
        assert!(doc.paths.paths.contains_key("/api/v1/city/{id}"));
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
