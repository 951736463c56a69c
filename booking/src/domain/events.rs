/// Domain events
use super::base::DomainEvent;
use super::value_objects::{ContactField, DraftId, ServiceId};
use chrono::NaiveDateTime;

/// Something that happened to a booking draft
///
/// Every draft mutation is expressed as one of these and applied through
/// `AggregateRoot::apply_event`, so the recorded events replay to the same state.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingEvent {
    StartDateChanged {
        draft_id: DraftId,
        start: NaiveDateTime,
        /// Set when the end date was filled in from the default duration
        coupled_end: Option<NaiveDateTime>,
    },
    EndDateChanged {
        draft_id: DraftId,
        end: Option<NaiveDateTime>,
    },
    GuestCountChanged {
        draft_id: DraftId,
        guest_count: u32,
    },
    ServiceQuantityChanged {
        draft_id: DraftId,
        service_id: ServiceId,
        quantity: u32,
    },
    ContactFieldChanged {
        draft_id: DraftId,
        field: ContactField,
        value: String,
    },
    SpecialRequestsChanged {
        draft_id: DraftId,
        special_requests: String,
    },
    EventTypeChanged {
        draft_id: DraftId,
        event_type: String,
    },
    DraftSubmitted {
        draft_id: DraftId,
    },
}

impl BookingEvent {
    pub fn draft_id(&self) -> DraftId {
        match self {
            BookingEvent::StartDateChanged { draft_id, .. }
            | BookingEvent::EndDateChanged { draft_id, .. }
            | BookingEvent::GuestCountChanged { draft_id, .. }
            | BookingEvent::ServiceQuantityChanged { draft_id, .. }
            | BookingEvent::ContactFieldChanged { draft_id, .. }
            | BookingEvent::SpecialRequestsChanged { draft_id, .. }
            | BookingEvent::EventTypeChanged { draft_id, .. }
            | BookingEvent::DraftSubmitted { draft_id } => *draft_id,
        }
    }
}

impl DomainEvent for BookingEvent {
    fn event_type(&self) -> &'static str {
        match self {
            BookingEvent::StartDateChanged { .. } => "StartDateChanged",
            BookingEvent::EndDateChanged { .. } => "EndDateChanged",
            BookingEvent::GuestCountChanged { .. } => "GuestCountChanged",
            BookingEvent::ServiceQuantityChanged { .. } => "ServiceQuantityChanged",
            BookingEvent::ContactFieldChanged { .. } => "ContactFieldChanged",
            BookingEvent::SpecialRequestsChanged { .. } => "SpecialRequestsChanged",
            BookingEvent::EventTypeChanged { .. } => "EventTypeChanged",
            BookingEvent::DraftSubmitted { .. } => "DraftSubmitted",
        }
    }

    fn aggregate_id(&self) -> String {
        self.draft_id().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_start_date_changed_event() {
        let draft_id = DraftId::generate();
        let start = NaiveDate::from_ymd_opt(2030, 6, 3)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let event = BookingEvent::StartDateChanged {
            draft_id,
            start,
            coupled_end: None,
        };

        assert_eq!(event.event_type(), "StartDateChanged");
        assert_eq!(event.aggregate_id(), draft_id.to_string());
    }

    #[test]
    fn test_service_quantity_changed_event() {
        let draft_id = DraftId::generate();
        let event = BookingEvent::ServiceQuantityChanged {
            draft_id,
            service_id: ServiceId::new("catering").unwrap(),
            quantity: 2,
        };

        assert_eq!(event.event_type(), "ServiceQuantityChanged");
        assert_eq!(event.draft_id(), draft_id);
    }

    #[test]
    fn test_draft_submitted_event() {
        let draft_id = DraftId::generate();
        let event = BookingEvent::DraftSubmitted { draft_id };

        assert_eq!(event.event_type(), "DraftSubmitted");
        assert_eq!(event.aggregate_id(), draft_id.to_string());
    }
}
