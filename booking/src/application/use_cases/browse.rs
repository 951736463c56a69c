use crate::application::repositories::VenueRepository;
use crate::domain::{
    entities::Venue,
    services::{AvailabilityCalculator, Clock},
    value_objects::LocalizedText,
    DomainResult,
};
use chrono::NaiveDate;

/// Use case for browsing venues bookable on a given date
///
/// A venue is listed when the date is available and the guest count fits
/// its capacity. Results are sorted by name in the requested language.
pub struct FindAvailableVenues<'a, R: VenueRepository, C: Clock> {
    repository: &'a R,
    availability: &'a AvailabilityCalculator<C>,
    language: String,
}

impl<'a, R: VenueRepository, C: Clock> FindAvailableVenues<'a, R, C> {
    pub fn new(repository: &'a R, availability: &'a AvailabilityCalculator<C>) -> Self {
        Self {
            repository,
            availability,
            language: LocalizedText::FALLBACK_LANGUAGE.to_string(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn execute(&self, date: NaiveDate, guests: u32) -> DomainResult<Vec<Venue>> {
        let mut venues: Vec<Venue> = self
            .repository
            .find_all()?
            .into_iter()
            .filter(|venue| venue.capacity().contains(guests))
            .filter(|venue| self.availability.is_date_available(venue, date))
            .collect();

        venues.sort_by_cached_key(|venue| {
            venue
                .name()
                .get(&self.language)
                .unwrap_or_default()
                .to_lowercase()
        });

        tracing::debug!(
            "{} venue(s) available on {} for {} guests",
            venues.len(),
            date,
            guests
        );
        Ok(venues)
    }
}
