mod event;
mod event_dates;
mod reference;
mod venue;

pub use event::{Event, EventStatus, ValidateStatus};
pub use event_dates::{DateRange, EventDates};
pub use reference::{BookingCount, GenreRef, OrganizerRef};
pub use venue::{Venue, VenueDetail};
