/// Pricing engine - venue and service costs for a booking draft
use crate::domain::aggregates::BookingDraft;
use crate::domain::base::Entity;
use crate::domain::entities::{Service, Venue};
use crate::domain::value_objects::{Currency, LocalizedText, Price, PricingModel, ServiceId};
use serde::Serialize;

/// Hours billed when a draft is shorter than this or has no time window
pub const DEFAULT_MINIMUM_BILLABLE_HOURS: u32 = 1;

const HOURS_PER_DAY: u32 = 24;

/// One priced service in a breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLineItem {
    pub service_id: ServiceId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub model: PricingModel,
    pub cost: f64,
}

/// Itemized cost of a draft; recomputed on demand, never stored
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub duration_hours: u32,
    pub venue_cost: f64,
    pub services: Vec<ServiceLineItem>,
    pub services_cost: f64,
    pub total: f64,
    pub currency: Currency,
}

/// Computes costs from a venue, its services and a draft
///
/// No currency conversion is done: every amount is summed as-is and the
/// breakdown is labeled with the venue's currency.
#[derive(Debug, Clone, Copy)]
pub struct PricingEngine {
    minimum_billable_hours: u32,
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MINIMUM_BILLABLE_HOURS)
    }
}

impl PricingEngine {
    /// The minimum is never below one hour
    pub fn new(minimum_billable_hours: u32) -> Self {
        PricingEngine {
            minimum_billable_hours: minimum_billable_hours.max(1),
        }
    }

    pub fn minimum_billable_hours(&self) -> u32 {
        self.minimum_billable_hours
    }

    /// Booked hours, rounded up and floored at the minimum billable hours
    pub fn duration_hours(&self, draft: &BookingDraft) -> u32 {
        let hours = match (draft.start(), draft.end()) {
            (Some(start), Some(end)) => {
                let seconds = (end - start).num_seconds().max(0);
                let hours = (seconds + 3599) / 3600;
                u32::try_from(hours).unwrap_or(u32::MAX)
            }
            _ => 0,
        };
        hours.max(self.minimum_billable_hours)
    }

    /// Booked days, rounded up; at least one
    pub fn duration_days(&self, draft: &BookingDraft) -> u32 {
        self.duration_hours(draft).div_ceil(HOURS_PER_DAY).max(1)
    }

    pub fn venue_cost(&self, venue: &Venue, draft: &BookingDraft) -> f64 {
        self.cost(venue.price(), 1, draft)
    }

    pub fn service_cost(&self, service: &Service, quantity: u32, draft: &BookingDraft) -> f64 {
        if quantity == 0 {
            return 0.0;
        }
        self.cost(service.price(), quantity, draft)
    }

    /// Sum over the services the draft selected with a quantity above zero
    pub fn total_services_cost(&self, services: &[Service], draft: &BookingDraft) -> f64 {
        services
            .iter()
            .map(|service| self.service_cost(service, draft.quantity(service.id()), draft))
            .sum()
    }

    pub fn total(&self, venue: &Venue, services: &[Service], draft: &BookingDraft) -> f64 {
        self.venue_cost(venue, draft) + self.total_services_cost(services, draft)
    }

    pub fn breakdown(
        &self,
        venue: &Venue,
        services: &[Service],
        draft: &BookingDraft,
    ) -> PriceBreakdown {
        self.breakdown_in(venue, services, draft, LocalizedText::FALLBACK_LANGUAGE)
    }

    /// Same as `breakdown`, with service names in `language`
    pub fn breakdown_in(
        &self,
        venue: &Venue,
        services: &[Service],
        draft: &BookingDraft,
        language: &str,
    ) -> PriceBreakdown {
        let currency = venue.price().currency().clone();
        let venue_cost = self.venue_cost(venue, draft);

        let items: Vec<ServiceLineItem> = services
            .iter()
            .filter_map(|service| {
                let quantity = draft.quantity(service.id());
                if quantity == 0 {
                    return None;
                }
                if service.price().currency() != &currency {
                    tracing::warn!(
                        "Service {} is priced in {} but venue {} uses {}; amounts summed without conversion",
                        service.id(),
                        service.price().currency(),
                        venue.id(),
                        currency
                    );
                }
                Some(ServiceLineItem {
                    service_id: service.id().clone(),
                    name: service.name().get(language).unwrap_or_default().to_string(),
                    quantity,
                    unit_price: service.price().amount(),
                    model: service.price().model(),
                    cost: self.service_cost(service, quantity, draft),
                })
            })
            .collect();

        let services_cost: f64 = items.iter().map(|item| item.cost).sum();
        let total = venue_cost + services_cost;

        tracing::debug!(
            "Priced draft {}: venue {:.2} + services {:.2} = {:.2} {}",
            draft.id(),
            venue_cost,
            services_cost,
            total,
            currency
        );

        PriceBreakdown {
            duration_hours: self.duration_hours(draft),
            venue_cost,
            services: items,
            services_cost,
            total,
            currency,
        }
    }

    fn cost(&self, price: &Price, quantity: u32, draft: &BookingDraft) -> f64 {
        let units = f64::from(quantity);
        match price.model() {
            PricingModel::Hourly => {
                price.amount() * units * f64::from(self.duration_hours(draft))
            }
            PricingModel::PerPerson => price.amount() * units * f64::from(draft.guest_count()),
            PricingModel::PerDay => price.amount() * units * f64::from(self.duration_days(draft)),
            PricingModel::Fixed | PricingModel::Custom => price.amount() * units,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{CapacityRange, LocalizedText, VenueId};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 6, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn usd(amount: f64, model: PricingModel) -> Price {
        Price::new(amount, Currency::new("USD").unwrap(), model).unwrap()
    }

    fn venue(price: Price) -> Venue {
        Venue::new(
            VenueId::new("hall-1").unwrap(),
            LocalizedText::new("Grand Hall"),
            CapacityRange::new(1, 500, None).unwrap(),
            price,
        )
    }

    fn service(id: &str, price: Price) -> Service {
        Service::new(ServiceId::new(id).unwrap(), LocalizedText::new(id), price)
    }

    fn draft(start: NaiveDateTime, end: NaiveDateTime, guests: u32) -> BookingDraft {
        let mut draft = BookingDraft::new(VenueId::new("hall-1").unwrap(), guests);
        draft.set_start_date(start).unwrap();
        draft.set_end_date(end).unwrap();
        draft
    }

    #[test]
    fn test_hourly_venue_cost() {
        let engine = PricingEngine::default();
        let draft = draft(at(4, 10, 0), at(4, 13, 0), 20);

        assert_eq!(engine.duration_hours(&draft), 3);
        assert_eq!(engine.venue_cost(&venue(usd(100.0, PricingModel::Hourly)), &draft), 300.0);
    }

    #[test]
    fn test_partial_hours_round_up() {
        let engine = PricingEngine::default();
        let draft = draft(at(4, 10, 0), at(4, 12, 10), 20);
        assert_eq!(engine.duration_hours(&draft), 3);
    }

    #[test]
    fn test_minimum_billable_hours() {
        let engine = PricingEngine::new(2);
        let short = draft(at(4, 10, 0), at(4, 10, 30), 20);
        assert_eq!(engine.duration_hours(&short), 2);

        let empty = BookingDraft::new(VenueId::new("hall-1").unwrap(), 20);
        assert_eq!(PricingEngine::default().duration_hours(&empty), 1);
    }

    #[test]
    fn test_minimum_is_at_least_one_hour() {
        let engine = PricingEngine::new(0);
        assert_eq!(engine.minimum_billable_hours(), 1);

        let hall = venue(usd(100.0, PricingModel::Hourly));
        let empty = BookingDraft::new(VenueId::new("hall-1").unwrap(), 20);
        let zero_length = draft(at(4, 10, 0), at(4, 10, 0), 20);

        assert_eq!(engine.duration_hours(&empty), 1);
        assert_eq!(engine.venue_cost(&hall, &empty), 100.0);
        assert_eq!(engine.duration_hours(&zero_length), 1);
        assert_eq!(engine.venue_cost(&hall, &zero_length), 100.0);
    }

    #[test]
    fn test_fixed_price_ignores_duration_and_guests() {
        let engine = PricingEngine::default();
        let venue = venue(usd(150.0, PricingModel::Fixed));

        let short = draft(at(4, 10, 0), at(4, 11, 0), 10);
        let long = draft(at(4, 10, 0), at(5, 22, 0), 400);
        assert_eq!(engine.venue_cost(&venue, &short), 150.0);
        assert_eq!(engine.venue_cost(&venue, &long), 150.0);
    }

    #[test]
    fn test_per_person_service_cost() {
        let engine = PricingEngine::default();
        let drinks = service("drinks", usd(20.0, PricingModel::PerPerson));
        let draft = draft(at(4, 10, 0), at(4, 13, 0), 5);

        assert_eq!(engine.service_cost(&drinks, 2, &draft), 200.0);
        assert_eq!(engine.service_cost(&drinks, 0, &draft), 0.0);
    }

    #[test]
    fn test_per_day_cost_rounds_up_days() {
        let engine = PricingEngine::default();
        let venue = venue(usd(500.0, PricingModel::PerDay));

        let same_day = draft(at(4, 10, 0), at(4, 13, 0), 10);
        assert_eq!(engine.venue_cost(&venue, &same_day), 500.0);

        let overnight = draft(at(4, 10, 0), at(5, 11, 0), 10);
        assert_eq!(engine.duration_days(&overnight), 2);
        assert_eq!(engine.venue_cost(&venue, &overnight), 1000.0);
    }

    #[test]
    fn test_breakdown_skips_unselected_services() {
        let engine = PricingEngine::default();
        let venue = venue(usd(100.0, PricingModel::Hourly));
        let services = vec![
            service("catering", usd(15.0, PricingModel::PerPerson)),
            service("dj", usd(80.0, PricingModel::Hourly)),
            service("flowers", usd(250.0, PricingModel::Fixed)),
        ];

        let mut draft = draft(at(4, 10, 0), at(4, 13, 0), 10);
        draft
            .adjust_service_quantity(&ServiceId::new("catering").unwrap(), 1)
            .unwrap();
        draft
            .adjust_service_quantity(&ServiceId::new("dj").unwrap(), 1)
            .unwrap();

        let breakdown = engine.breakdown(&venue, &services, &draft);
        assert_eq!(breakdown.venue_cost, 300.0);
        assert_eq!(breakdown.services.len(), 2);
        assert_eq!(breakdown.services_cost, 150.0 + 240.0);
        assert_eq!(breakdown.total, 300.0 + 390.0);
        assert_eq!(breakdown.currency.as_str(), "USD");
        assert_eq!(
            engine.total(&venue, &services, &draft),
            breakdown.total
        );
    }

    #[test]
    fn test_breakdown_serializes_camel_case() {
        let engine = PricingEngine::default();
        let draft = draft(at(4, 10, 0), at(4, 13, 0), 10);
        let breakdown = engine.breakdown(&venue(usd(100.0, PricingModel::Hourly)), &[], &draft);

        let json = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(json["venueCost"], 300.0);
        assert_eq!(json["servicesCost"], 0.0);
        assert_eq!(json["durationHours"], 3);
        assert_eq!(json["currency"], "USD");
    }
}
