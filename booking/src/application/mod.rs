pub mod dto;
pub mod repositories;
pub mod services;
pub mod use_cases;

// Re-export key types to avoid naming conflicts
pub use dto::{BookingQuote, BookingRequestDto, BookingSubmission, CatalogDto};
pub use repositories::{InMemoryKeyValueStore, KeyValueStore, VenueRepository};
pub use services::{
    BookingConfirmation, BookingGateway, BookingSession, InMemoryBookingGateway, SessionOptions,
    SubmissionError, SubmissionResult, SubmitBooking,
};
pub use use_cases::{FavoriteVenues, FindAvailableVenues, QuoteBooking};
