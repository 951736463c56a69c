/// Booking session - the editable state behind a booking form
use super::submission::{SubmissionError, SubmissionResult};
use crate::application::dto::BookingSubmission;
use crate::domain::aggregates::{BookingDraft, DEFAULT_DURATION_HOURS};
use crate::domain::base::{DomainError, DomainResult, Entity};
use crate::domain::entities::{Service, Venue};
use crate::domain::events::BookingEvent;
use crate::domain::services::{
    AvailabilityCalculator, BookingValidator, Clock, PriceBreakdown, PricingEngine, SystemClock,
};
use crate::domain::value_objects::{ContactField, ServiceId, ValidationErrors};
use chrono::{NaiveDateTime, NaiveTime};

/// Hour of day a start date falls back to when none is known
pub const DEFAULT_START_HOUR: u32 = 10;

/// Knobs a session is created with
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub default_start_hour: u32,
    pub default_duration_hours: u32,
    pub pricing: PricingEngine,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            default_start_hour: DEFAULT_START_HOUR,
            default_duration_hours: DEFAULT_DURATION_HOURS,
            pricing: PricingEngine::default(),
        }
    }
}

/// One user's in-progress booking of one venue
///
/// Owns the venue snapshot, its services and the draft, and routes every
/// edit through the draft so that reported errors are cleared optimistically.
/// Full validation only runs when `validate` or `finalize` is called.
pub struct BookingSession<C: Clock = SystemClock> {
    venue: Venue,
    services: Vec<Service>,
    draft: BookingDraft,
    availability: AvailabilityCalculator<C>,
    options: SessionOptions,
}

impl<C: Clock> BookingSession<C> {
    pub fn new(venue: Venue, services: Vec<Service>, availability: AvailabilityCalculator<C>) -> Self {
        Self::with_options(venue, services, availability, SessionOptions::default())
    }

    /// Start a draft at the venue's earliest available date and the default
    /// start hour, with the minimum guest count
    pub fn with_options(
        venue: Venue,
        services: Vec<Service>,
        availability: AvailabilityCalculator<C>,
        options: SessionOptions,
    ) -> Self {
        let draft = BookingDraft::new(venue.id().clone(), venue.capacity().min())
            .with_default_duration_hours(options.default_duration_hours);
        let mut session = BookingSession {
            venue,
            services,
            draft,
            availability,
            options,
        };

        let started = session
            .earliest_start(None)
            .and_then(|start| session.draft.set_start_date(start));
        if let Err(e) = started {
            tracing::warn!("Starting booking without dates: {}", e);
        }
        session.draft.take_events();
        session
    }

    pub fn venue(&self) -> &Venue {
        &self.venue
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn availability(&self) -> &AvailabilityCalculator<C> {
        &self.availability
    }

    /// Errors from the last validation, minus fields edited since
    pub fn errors(&self) -> &ValidationErrors {
        self.draft.reported_errors()
    }

    pub fn set_start_date(&mut self, start: NaiveDateTime) -> DomainResult<()> {
        self.draft.set_start_date(start)
    }

    /// Reset the start to the earliest available date at the default start hour
    pub fn clear_start_date(&mut self) -> DomainResult<()> {
        let fallback = self.earliest_start(None)?;
        self.draft.clear_start_date(fallback)
    }

    pub fn set_end_date(&mut self, end: NaiveDateTime) -> DomainResult<()> {
        self.draft.set_end_date(end)
    }

    pub fn clear_end_date(&mut self) -> DomainResult<()> {
        self.draft.clear_end_date()
    }

    pub fn set_guest_count(&mut self, guest_count: u32) -> DomainResult<()> {
        self.draft.set_guest_count(guest_count)
    }

    /// Only services offered with the venue can be selected
    pub fn adjust_service_quantity(&mut self, service_id: &ServiceId, delta: i64) -> DomainResult<u32> {
        if self.service(service_id).is_none() {
            return Err(DomainError::NotFound(format!(
                "Service {} is not offered with venue {}",
                service_id,
                self.venue.id()
            )));
        }
        self.draft.adjust_service_quantity(service_id, delta)
    }

    pub fn set_contact_field(&mut self, field: ContactField, value: impl Into<String>) -> DomainResult<()> {
        self.draft.set_contact_field(field, value)
    }

    pub fn set_special_requests(&mut self, special_requests: impl Into<String>) -> DomainResult<()> {
        self.draft.set_special_requests(special_requests)
    }

    pub fn set_event_type(&mut self, event_type: impl Into<String>) -> DomainResult<()> {
        self.draft.set_event_type(event_type)
    }

    /// Run every check and remember the outcome as the reported errors
    pub fn validate(&mut self) -> ValidationErrors {
        let errors = BookingValidator::new(&self.availability).validate(&self.venue, &self.draft);
        self.draft.report_errors(errors.clone());
        errors
    }

    pub fn price(&self) -> PriceBreakdown {
        self.options
            .pricing
            .breakdown(&self.venue, &self.services, &self.draft)
    }

    pub fn total(&self) -> f64 {
        self.options
            .pricing
            .total(&self.venue, &self.services, &self.draft)
    }

    /// Swap in fresh data for the same venue and re-clamp the draft to it
    ///
    /// An unavailable or missing start moves to the earliest available date,
    /// keeping its time of day. An end that is missing, unavailable or not
    /// after the start is reset to start + default duration. Selections of
    /// services the venue no longer offers are dropped. The resulting draft
    /// events stay queued for `take_events`.
    ///
    /// On error the session is left unchanged.
    pub fn replace_venue(&mut self, venue: Venue, services: Vec<Service>) -> DomainResult<()> {
        if venue.id() != self.venue.id() {
            return Err(DomainError::InvalidValue(format!(
                "Cannot replace venue {} with venue {}",
                self.venue.id(),
                venue.id()
            )));
        }
        if self.draft.is_submitted() {
            return Err(DomainError::InvalidOperation(format!(
                "Booking draft {} has already been submitted",
                self.draft.id()
            )));
        }

        let moved_start = match self.draft.start() {
            Some(start) if self.availability.is_available_at(&venue, start) => None,
            current => Some(self.earliest_start_for(&venue, current.map(|start| start.time()))?),
        };

        self.venue = venue;
        self.services = services;

        if let Some(start) = moved_start {
            self.draft.set_start_date(start)?;
        }
        if let Some(start) = self.draft.start() {
            let end_ok = self
                .draft
                .end()
                .is_some_and(|end| end > start && self.availability.is_available_at(&self.venue, end));
            if !end_ok {
                self.draft.clear_end_date()?;
            }
        }

        let dropped: Vec<ServiceId> = self
            .draft
            .selected_services()
            .filter(|(id, _)| self.service(id).is_none())
            .map(|(id, _)| id.clone())
            .collect();
        for service_id in dropped {
            tracing::warn!(
                "Service {} is no longer offered with venue {}, removing it",
                service_id,
                self.venue.id()
            );
            let quantity = self.draft.quantity(&service_id);
            self.draft
                .adjust_service_quantity(&service_id, -i64::from(quantity))?;
        }

        tracing::debug!("Venue {} refreshed for draft {}", self.venue.id(), self.draft.id());
        Ok(())
    }

    /// Validate and package the draft for submission
    ///
    /// The draft stays editable until the gateway accepts it.
    pub fn finalize(&mut self) -> SubmissionResult<BookingSubmission> {
        if self.draft.is_submitted() {
            return Err(DomainError::InvalidOperation(format!(
                "Booking draft {} has already been submitted",
                self.draft.id()
            ))
            .into());
        }

        let errors = self.validate();
        if !errors.is_valid() {
            return Err(SubmissionError::Rejected(errors));
        }
        Ok(BookingSubmission::from_draft(&self.draft, self.price())?)
    }

    pub fn mark_submitted(&mut self) -> DomainResult<()> {
        self.draft.mark_submitted()
    }

    /// Drain the draft's recorded events
    pub fn take_events(&mut self) -> Vec<BookingEvent> {
        self.draft.take_events()
    }

    pub fn into_draft(self) -> BookingDraft {
        self.draft
    }

    fn service(&self, service_id: &ServiceId) -> Option<&Service> {
        self.services.iter().find(|service| service.id() == service_id)
    }

    fn earliest_start(&self, time_of_day: Option<NaiveTime>) -> DomainResult<NaiveDateTime> {
        self.earliest_start_for(&self.venue, time_of_day)
    }

    fn earliest_start_for(
        &self,
        venue: &Venue,
        time_of_day: Option<NaiveTime>,
    ) -> DomainResult<NaiveDateTime> {
        let date = self.availability.earliest_available_date(venue)?;
        let time = match time_of_day {
            Some(time) => time,
            None => NaiveTime::from_hms_opt(self.options.default_start_hour, 0, 0).ok_or_else(|| {
                DomainError::InvalidValue(format!(
                    "Invalid default start hour {}",
                    self.options.default_start_hour
                ))
            })?,
        };
        Ok(date.and_time(time))
    }
}
