use crate::application::{
    dto::{BookingQuote, BookingRequestDto},
    repositories::VenueRepository,
};
use crate::domain::{
    aggregates::{BookingDraft, DEFAULT_DURATION_HOURS},
    base::DomainError,
    services::{AvailabilityCalculator, BookingValidator, Clock, PricingEngine},
    value_objects::{LocalizedText, VenueId},
    DomainResult,
};

/// Use case for validating and pricing a booking in one step
///
/// Loads the venue and its services, runs the validator and the pricing
/// engine, and returns both results. A quote is produced even when the
/// draft is invalid so the form can show a running total.
pub struct QuoteBooking<'a, R: VenueRepository, C: Clock> {
    repository: &'a R,
    availability: &'a AvailabilityCalculator<C>,
    pricing: PricingEngine,
    default_duration_hours: u32,
    language: String,
}

impl<'a, R: VenueRepository, C: Clock> QuoteBooking<'a, R, C> {
    pub fn new(repository: &'a R, availability: &'a AvailabilityCalculator<C>) -> Self {
        Self {
            repository,
            availability,
            pricing: PricingEngine::default(),
            default_duration_hours: DEFAULT_DURATION_HOURS,
            language: LocalizedText::FALLBACK_LANGUAGE.to_string(),
        }
    }

    pub fn with_pricing(mut self, pricing: PricingEngine) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_default_duration_hours(mut self, hours: u32) -> Self {
        self.default_duration_hours = hours;
        self
    }

    /// Language of the service names in the breakdown
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn execute(&self, draft: &BookingDraft) -> DomainResult<BookingQuote> {
        let venue_id = draft.venue_id();
        let venue = self
            .repository
            .find_by_id(venue_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Venue {} not found", venue_id)))?;
        let services = self.repository.find_services(venue_id)?;

        let errors = BookingValidator::new(self.availability).validate(&venue, draft);
        let breakdown = self
            .pricing
            .breakdown_in(&venue, &services, draft, &self.language);

        Ok(BookingQuote { errors, breakdown })
    }

    /// Quote a raw request; the draft is built against the stored venue
    pub fn execute_request(&self, request: BookingRequestDto) -> DomainResult<BookingQuote> {
        let venue_id = VenueId::new(request.venue_id.clone())?;
        let venue = self
            .repository
            .find_by_id(&venue_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Venue {} not found", venue_id)))?;

        let draft = request.into_draft_with_duration(&venue, self.default_duration_hours)?;
        self.execute(&draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        base::Entity,
        entities::{Service, Venue},
        services::FixedClock,
        value_objects::{
            BookingField, CapacityRange, Currency, LocalizedText, OperatingHours, Price,
            PricingModel, ServiceId, TimeWindow,
        },
    };
    use chrono::NaiveDate;

    struct InMemoryVenueRepository {
        venues: Vec<Venue>,
        services: Vec<Service>,
    }

    impl VenueRepository for InMemoryVenueRepository {
        fn find_by_id(&self, id: &VenueId) -> DomainResult<Option<Venue>> {
            Ok(self.venues.iter().find(|v| v.id() == id).cloned())
        }

        fn find_all(&self) -> DomainResult<Vec<Venue>> {
            Ok(self.venues.clone())
        }

        fn find_services(&self, venue_id: &VenueId) -> DomainResult<Vec<Service>> {
            let Some(venue) = self.venues.iter().find(|v| v.id() == venue_id) else {
                return Ok(Vec::new());
            };
            Ok(self
                .services
                .iter()
                .filter(|s| venue.offers_service(s.id()))
                .cloned()
                .collect())
        }
    }

    fn usd(amount: f64, model: PricingModel) -> Price {
        Price::new(amount, Currency::new("USD").unwrap(), model).unwrap()
    }

    fn repository() -> InMemoryVenueRepository {
        let catering = ServiceId::new("catering").unwrap();
        InMemoryVenueRepository {
            venues: vec![Venue::new(
                VenueId::new("hall-1").unwrap(),
                LocalizedText::new("Grand Hall"),
                CapacityRange::new(10, 100, None).unwrap(),
                usd(100.0, PricingModel::Hourly),
            )
            .with_operating_hours(OperatingHours::every_day(
                TimeWindow::parse("9:00 AM - 10:00 PM").unwrap(),
            ))
            .with_service_ids(vec![catering.clone()])],
            services: vec![
                Service::new(
                    catering,
                    LocalizedText::new("Catering").with_translation("ar", "ضيافة"),
                    usd(20.0, PricingModel::PerPerson),
                ),
                Service::new(
                    ServiceId::new("fireworks").unwrap(),
                    LocalizedText::new("Fireworks"),
                    usd(5000.0, PricingModel::Fixed),
                ),
            ],
        }
    }

    fn calculator() -> AvailabilityCalculator<FixedClock> {
        AvailabilityCalculator::new(FixedClock::new(NaiveDate::from_ymd_opt(2030, 6, 3).unwrap()))
    }

    #[test]
    fn test_quote_request() {
        let repo = repository();
        let calc = calculator();
        let request: BookingRequestDto = serde_json::from_str(
            r#"{
                "venueId": "hall-1",
                "start": "2030-06-04T10:00:00",
                "end": "2030-06-04T13:00:00",
                "guests": 5,
                "services": {"catering": 2, "fireworks": 1}
            }"#,
        )
        .unwrap();

        let quote = QuoteBooking::new(&repo, &calc).execute_request(request).unwrap();

        assert!(!quote.is_bookable());
        assert_eq!(quote.errors.get(BookingField::Guests), Some("Minimum 10 guests required"));
        assert_eq!(quote.breakdown.venue_cost, 300.0);
        // fireworks is not offered by the venue
        assert_eq!(quote.breakdown.services_cost, 200.0);
        assert_eq!(quote.breakdown.total, 500.0);
    }

    #[test]
    fn test_quote_unknown_venue() {
        let repo = repository();
        let calc = calculator();
        let draft = BookingDraft::new(VenueId::new("nowhere").unwrap(), 20);

        let result = QuoteBooking::new(&repo, &calc).execute(&draft);
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[test]
    fn test_quote_uses_configured_duration() {
        let repo = repository();
        let calc = calculator();
        let request: BookingRequestDto = serde_json::from_str(
            r#"{"venueId": "hall-1", "start": "2030-06-04T10:00:00", "guests": 20}"#,
        )
        .unwrap();

        let quote = QuoteBooking::new(&repo, &calc)
            .with_default_duration_hours(5)
            .execute_request(request)
            .unwrap();
        assert_eq!(quote.breakdown.duration_hours, 5);
        assert_eq!(quote.breakdown.venue_cost, 500.0);
    }

    #[test]
    fn test_quote_names_services_in_language() {
        let repo = repository();
        let calc = calculator();
        let request: BookingRequestDto = serde_json::from_str(
            r#"{"venueId": "hall-1", "start": "2030-06-04T10:00:00", "services": {"catering": 1}}"#,
        )
        .unwrap();

        let english = QuoteBooking::new(&repo, &calc)
            .execute_request(request.clone())
            .unwrap();
        assert_eq!(english.breakdown.services[0].name, "Catering");

        let arabic = QuoteBooking::new(&repo, &calc)
            .with_language("ar")
            .execute_request(request)
            .unwrap();
        assert_eq!(arabic.breakdown.services[0].name, "ضيافة");
    }
}
