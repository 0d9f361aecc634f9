//! Events with their occurrence dates and venues.
//!
//! An event owns any number of date windows and venues. Each venue sits in a
//! city → state → country chain resolved by name through
//! [`crate::features::locations::GeoResolver`]. Create and update touch the
//! event, its children and the geo tables in one transaction.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/v1/event` | - | List active events (`name`, `organizerId`, `page`) |
//! | POST | `/api/v1/event` | JWT | Create event with dates and venues |
//! | GET | `/api/v1/event/{id}` | JWT | Get event |
//! | PUT | `/api/v1/event/{id}` | JWT | Update event, dates and venues |
//! | DELETE | `/api/v1/event/{id}` | JWT | Delete event and its dependents |
//! | GET | `/api/v1/event/rate/{id}` | JWT | Average feedback rate |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::EventService;
