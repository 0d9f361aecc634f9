//! Geographic reference data: countries, states and cities.
//!
//! Rows are created lazily by [`services::GeoResolver`] when venues name a
//! location, and are never deleted by the event workflow. The read-only
//! endpoints below expose what has accumulated.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/v1/country` | List countries |
//! | GET | `/api/v1/country/{id}` | Get country |
//! | GET | `/api/v1/state` | List states (optionally by `countryId`) |
//! | GET | `/api/v1/state/{id}` | Get state with its country |
//! | GET | `/api/v1/city` | List cities (optionally by `stateId`) |
//! | GET | `/api/v1/city/{id}` | Get city with its state and country |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{GeoChain, GeoResolver, LocationService};
