use crate::domain::{
    aggregates::{BookingDraft, DEFAULT_DURATION_HOURS},
    base::{DomainError, Entity},
    entities::Venue,
    services::PriceBreakdown,
    value_objects::{ContactField, ContactInfo, DraftId, ServiceId, ValidationErrors, VenueId},
    DomainResult,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A booking request as submitted by a form or read from a file
///
/// Date-times are local ISO strings such as `2030-06-04T10:00:00`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequestDto {
    pub venue_id: String,
    #[serde(default)]
    pub start: Option<NaiveDateTime>,
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
    #[serde(default, alias = "guests")]
    pub guest_count: Option<u32>,
    #[serde(default)]
    pub event_type: String,
    /// Service id to quantity
    #[serde(default)]
    pub services: BTreeMap<String, u32>,
    #[serde(default)]
    pub special_requests: String,
    #[serde(default)]
    pub contact_info: ContactInfo,
}

impl BookingRequestDto {
    /// Build a draft for `venue`, defaulting the guest count to the venue minimum
    pub fn into_draft(self, venue: &Venue) -> DomainResult<BookingDraft> {
        self.into_draft_with_duration(venue, DEFAULT_DURATION_HOURS)
    }

    pub fn into_draft_with_duration(
        self,
        venue: &Venue,
        default_duration_hours: u32,
    ) -> DomainResult<BookingDraft> {
        let venue_id = VenueId::new(self.venue_id)?;
        if &venue_id != venue.id() {
            return Err(DomainError::InvalidValue(format!(
                "Booking request is for venue {} but venue {} was supplied",
                venue_id,
                venue.id()
            )));
        }

        let guests = self.guest_count.unwrap_or_else(|| venue.capacity().min());
        let mut draft =
            BookingDraft::new(venue_id, guests).with_default_duration_hours(default_duration_hours);

        if let Some(end) = self.end {
            draft.set_end_date(end)?;
        }
        if let Some(start) = self.start {
            draft.set_start_date(start)?;
        }

        for (service_id, quantity) in self.services {
            draft.adjust_service_quantity(&ServiceId::new(service_id)?, i64::from(quantity))?;
        }

        for field in [
            ContactField::FirstName,
            ContactField::LastName,
            ContactField::Email,
            ContactField::Phone,
        ] {
            let value = self.contact_info.get(field);
            if !value.is_empty() {
                draft.set_contact_field(field, value)?;
            }
        }
        if !self.event_type.is_empty() {
            draft.set_event_type(self.event_type)?;
        }
        if !self.special_requests.is_empty() {
            draft.set_special_requests(self.special_requests)?;
        }

        draft.take_events();
        Ok(draft)
    }
}

/// A selected service and its quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedService {
    pub service_id: ServiceId,
    pub quantity: u32,
}

/// A finalized draft handed to the booking-creation collaborator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSubmission {
    pub draft_id: DraftId,
    pub venue_id: VenueId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub guest_count: u32,
    pub event_type: String,
    pub services: Vec<SelectedService>,
    pub special_requests: String,
    pub contact_info: ContactInfo,
    pub price: PriceBreakdown,
}

impl BookingSubmission {
    /// Fails when the draft has no time window
    pub fn from_draft(draft: &BookingDraft, price: PriceBreakdown) -> DomainResult<Self> {
        let (Some(start), Some(end)) = (draft.start(), draft.end()) else {
            return Err(DomainError::InvalidOperation(format!(
                "Booking draft {} has no complete time window",
                draft.id()
            )));
        };

        Ok(BookingSubmission {
            draft_id: *draft.id(),
            venue_id: draft.venue_id().clone(),
            start,
            end,
            guest_count: draft.guest_count(),
            event_type: draft.event_type().to_string(),
            services: draft
                .selected_services()
                .map(|(service_id, quantity)| SelectedService {
                    service_id: service_id.clone(),
                    quantity,
                })
                .collect(),
            special_requests: draft.special_requests().to_string(),
            contact_info: draft.contact_info().clone(),
            price,
        })
    }
}

/// Validation outcome and price of a draft
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuote {
    pub errors: ValidationErrors,
    pub breakdown: PriceBreakdown,
}

impl BookingQuote {
    pub fn is_bookable(&self) -> bool {
        self.errors.is_valid()
    }
}
