mod event_dates_service;
mod event_service;
mod target;
mod venue_service;

pub use event_dates_service::EventDatesService;
pub use event_service::EventService;
pub use venue_service::VenueService;
