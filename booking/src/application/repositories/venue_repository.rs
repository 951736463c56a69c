use crate::domain::{
    entities::{Service, Venue},
    value_objects::VenueId,
    DomainResult,
};

/// Read-only access to venue and service data.
///
/// The booking core never writes venues; implementations load them from
/// whatever backs the catalog (a JSON document, a remote API, ...).
pub trait VenueRepository {
    /// Finds a venue by its unique identifier.
    ///
    /// Returns `Ok(Some(venue))` if found, `Ok(None)` if not found,
    /// or an error if the lookup fails.
    fn find_by_id(&self, id: &VenueId) -> DomainResult<Option<Venue>>;

    /// Returns all venues in the catalog.
    fn find_all(&self) -> DomainResult<Vec<Venue>>;

    /// Returns the services that can be added to a booking of the venue.
    ///
    /// Service ids the venue lists but the catalog does not know are skipped.
    fn find_services(&self, venue_id: &VenueId) -> DomainResult<Vec<Service>>;
}
