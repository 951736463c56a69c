//! Booking computation and availability engine for an event-venue marketplace.
//!
//! The crate decides whether a requested booking of a venue (time window,
//! guest count, add-on services, contact details) is valid and what it costs.
//!
//! - [`domain`] holds the venue and draft model plus the pure services:
//!   availability, validation and pricing.
//! - [`application`] holds repository traits, DTOs, use cases and the
//!   stateful [`BookingSession`] that backs a booking form.
//! - [`infrastructure`] loads catalogs and configuration, persists favorites
//!   in SQLite and installs logging.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{
    BookingGateway, BookingQuote, BookingRequestDto, BookingSession, BookingSubmission,
    FavoriteVenues, FindAvailableVenues, QuoteBooking, SubmitBooking, VenueRepository,
};
pub use domain::{
    AvailabilityCalculator, BookingDraft, BookingValidator, DomainError, DomainResult,
    PriceBreakdown, PricingEngine, Service, ValidationErrors, Venue,
};
pub use infrastructure::{BookingConfig, JsonVenueCatalog};
