pub mod event_dto;

pub use event_dto::{
    CreateEventDto, CreateVenueDto, EventDatesChanges, EventDatesPatchDto, EventDatesResponseDto,
    EventListQuery, EventRateResponseDto, EventResponseDto, EventVenueResponseDto,
    GenreSummaryDto, OrganizerSummaryDto, UpdateEventDto, VenuePatchDto,
};
