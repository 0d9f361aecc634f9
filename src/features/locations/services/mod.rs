mod geo_resolver;
mod location_service;

pub use geo_resolver::{GeoChain, GeoResolver};
pub use location_service::LocationService;
