mod booking;
mod catalog;

pub use booking::{BookingQuote, BookingRequestDto, BookingSubmission, SelectedService};
pub use catalog::{
    parse_calendar_date, BlockedDateDto, CapacityDto, CatalogDto, DayHoursDto, LocalizedTextDto,
    PriceDto, ServiceDto, VenueDto, DEFAULT_CURRENCY,
};
