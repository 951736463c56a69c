/// Domain aggregates
use super::base::{AggregateRoot, DomainError, DomainResult, Entity};
use super::events::BookingEvent;
use super::value_objects::{
    BookingField, ContactField, ContactInfo, DraftId, ServiceId, ValidationErrors, VenueId,
};
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// Hours added to the start date when the end date is missing or cleared
pub const DEFAULT_DURATION_HOURS: u32 = 3;

/// Lifecycle of a draft: edited until handed to the booking-creation collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftStatus {
    Editing,
    Submitted,
}

/// A BookingDraft is the aggregate root for the in-progress, unsaved set of
/// selections describing a prospective booking
///
/// The draft is never persisted. It tracks the validation errors last reported
/// to the user so that each mutation can clear the errors of the fields it touches.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    id: DraftId,
    venue_id: VenueId,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    guest_count: u32,
    event_type: String,
    selected_services: BTreeMap<ServiceId, u32>,
    special_requests: String,
    contact_info: ContactInfo,
    reported_errors: ValidationErrors,
    status: DraftStatus,
    default_duration: Duration,
    pending_events: Vec<BookingEvent>,
}

impl BookingDraft {
    /// Create an empty draft for a venue
    pub fn new(venue_id: VenueId, guest_count: u32) -> Self {
        BookingDraft {
            id: DraftId::generate(),
            venue_id,
            start: None,
            end: None,
            guest_count,
            event_type: String::new(),
            selected_services: BTreeMap::new(),
            special_requests: String::new(),
            contact_info: ContactInfo::default(),
            reported_errors: ValidationErrors::new(),
            status: DraftStatus::Editing,
            default_duration: Duration::hours(i64::from(DEFAULT_DURATION_HOURS)),
            pending_events: Vec::new(),
        }
    }

    pub fn with_default_duration_hours(mut self, hours: u32) -> Self {
        self.default_duration = Duration::hours(i64::from(hours));
        self
    }

    pub fn venue_id(&self) -> &VenueId {
        &self.venue_id
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }

    pub fn guest_count(&self) -> u32 {
        self.guest_count
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn special_requests(&self) -> &str {
        &self.special_requests
    }

    pub fn contact_info(&self) -> &ContactInfo {
        &self.contact_info
    }

    pub fn status(&self) -> DraftStatus {
        self.status
    }

    pub fn is_submitted(&self) -> bool {
        self.status == DraftStatus::Submitted
    }

    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }

    /// Errors last reported to the user, minus those cleared by later edits
    pub fn reported_errors(&self) -> &ValidationErrors {
        &self.reported_errors
    }

    /// Selected quantity of a service; 0 when not selected
    pub fn quantity(&self, service_id: &ServiceId) -> u32 {
        self.selected_services.get(service_id).copied().unwrap_or(0)
    }

    /// Services with a quantity above zero
    pub fn selected_services(&self) -> impl Iterator<Item = (&ServiceId, u32)> {
        self.selected_services
            .iter()
            .filter(|(_, quantity)| **quantity > 0)
            .map(|(id, quantity)| (id, *quantity))
    }

    /// Set the start date; a missing end date is filled in from the default duration
    pub fn set_start_date(&mut self, start: NaiveDateTime) -> DomainResult<()> {
        self.ensure_editing()?;
        let coupled_end = match self.end {
            Some(_) => None,
            None => Some(start + self.default_duration),
        };
        self.record(BookingEvent::StartDateChanged {
            draft_id: self.id,
            start,
            coupled_end,
        });
        Ok(())
    }

    /// Clearing the start date resets it to `fallback`, normally the
    /// earliest available date of the venue
    pub fn clear_start_date(&mut self, fallback: NaiveDateTime) -> DomainResult<()> {
        self.set_start_date(fallback)
    }

    pub fn set_end_date(&mut self, end: NaiveDateTime) -> DomainResult<()> {
        self.ensure_editing()?;
        self.record(BookingEvent::EndDateChanged {
            draft_id: self.id,
            end: Some(end),
        });
        Ok(())
    }

    /// Clearing the end date resets it to start + default duration
    pub fn clear_end_date(&mut self) -> DomainResult<()> {
        self.ensure_editing()?;
        let end = self.start.map(|start| start + self.default_duration);
        self.record(BookingEvent::EndDateChanged {
            draft_id: self.id,
            end,
        });
        Ok(())
    }

    pub fn set_guest_count(&mut self, guest_count: u32) -> DomainResult<()> {
        self.ensure_editing()?;
        self.record(BookingEvent::GuestCountChanged {
            draft_id: self.id,
            guest_count,
        });
        Ok(())
    }

    /// Add `delta` to a service quantity, never going below zero
    /// Returns the resulting quantity
    pub fn adjust_service_quantity(
        &mut self,
        service_id: &ServiceId,
        delta: i64,
    ) -> DomainResult<u32> {
        self.ensure_editing()?;
        let current = i64::from(self.quantity(service_id));
        let quantity = current.saturating_add(delta).clamp(0, i64::from(u32::MAX)) as u32;
        self.record(BookingEvent::ServiceQuantityChanged {
            draft_id: self.id,
            service_id: service_id.clone(),
            quantity,
        });
        Ok(quantity)
    }

    pub fn set_contact_field(
        &mut self,
        field: ContactField,
        value: impl Into<String>,
    ) -> DomainResult<()> {
        self.ensure_editing()?;
        self.record(BookingEvent::ContactFieldChanged {
            draft_id: self.id,
            field,
            value: value.into(),
        });
        Ok(())
    }

    pub fn set_special_requests(&mut self, special_requests: impl Into<String>) -> DomainResult<()> {
        self.ensure_editing()?;
        self.record(BookingEvent::SpecialRequestsChanged {
            draft_id: self.id,
            special_requests: special_requests.into(),
        });
        Ok(())
    }

    pub fn set_event_type(&mut self, event_type: impl Into<String>) -> DomainResult<()> {
        self.ensure_editing()?;
        self.record(BookingEvent::EventTypeChanged {
            draft_id: self.id,
            event_type: event_type.into(),
        });
        Ok(())
    }

    /// Replace the reported errors with the outcome of a full validation
    pub fn report_errors(&mut self, errors: ValidationErrors) {
        self.reported_errors = errors;
    }

    /// Mark the draft as handed off to the booking-creation collaborator
    pub fn mark_submitted(&mut self) -> DomainResult<()> {
        self.ensure_editing()?;
        self.record(BookingEvent::DraftSubmitted { draft_id: self.id });
        Ok(())
    }

    /// Drain the events recorded since the last call
    pub fn take_events(&mut self) -> Vec<BookingEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn ensure_editing(&self) -> DomainResult<()> {
        if self.is_submitted() {
            return Err(DomainError::InvalidOperation(format!(
                "Booking draft {} has already been submitted",
                self.id
            )));
        }
        Ok(())
    }

    fn record(&mut self, event: BookingEvent) {
        self.apply_event(&event);
        self.pending_events.push(event);
    }
}

impl Entity for BookingDraft {
    type Id = DraftId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for BookingDraft {
    type Event = BookingEvent;

    fn apply_event(&mut self, event: &BookingEvent) {
        if event.draft_id() != self.id {
            tracing::warn!(
                "Ignoring {:?} addressed to draft {}, this is draft {}",
                event,
                event.draft_id(),
                self.id
            );
            return;
        }

        match event {
            BookingEvent::StartDateChanged {
                start, coupled_end, ..
            } => {
                self.start = Some(*start);
                self.reported_errors.clear(BookingField::StartDate);
                self.reported_errors.clear(BookingField::StartTime);
                if let Some(end) = coupled_end {
                    self.end = Some(*end);
                    self.reported_errors.clear(BookingField::EndDate);
                    self.reported_errors.clear(BookingField::EndTime);
                }
            }
            BookingEvent::EndDateChanged { end, .. } => {
                self.end = *end;
                self.reported_errors.clear(BookingField::EndDate);
                self.reported_errors.clear(BookingField::EndTime);
            }
            BookingEvent::GuestCountChanged { guest_count, .. } => {
                self.guest_count = *guest_count;
                self.reported_errors.clear(BookingField::Guests);
            }
            BookingEvent::ServiceQuantityChanged {
                service_id,
                quantity,
                ..
            } => {
                if *quantity == 0 {
                    self.selected_services.remove(service_id);
                } else {
                    self.selected_services.insert(service_id.clone(), *quantity);
                }
            }
            BookingEvent::ContactFieldChanged { field, value, .. } => {
                self.contact_info.set(*field, value.clone());
                self.reported_errors.clear_contact(*field);
            }
            BookingEvent::SpecialRequestsChanged {
                special_requests, ..
            } => {
                self.special_requests = special_requests.clone();
            }
            BookingEvent::EventTypeChanged { event_type, .. } => {
                self.event_type = event_type.clone();
            }
            BookingEvent::DraftSubmitted { .. } => {
                self.status = DraftStatus::Submitted;
            }
        }
    }
}
