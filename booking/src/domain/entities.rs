/// Domain entities
use super::base::Entity;
use super::value_objects::{
    BlockedDateRange, CapacityRange, LocalizedText, OperatingHours, Price, ServiceId, VenueId,
};
use std::collections::BTreeSet;

/// A bookable physical space offered by a business
/// Read-only from the booking core's perspective
#[derive(Debug, Clone)]
pub struct Venue {
    id: VenueId,
    name: LocalizedText,
    description: LocalizedText,
    address: String,
    capacity: CapacityRange,
    price: Price,
    operating_hours: OperatingHours,
    blocked_dates: Vec<BlockedDateRange>,
    amenities: BTreeSet<String>,
    service_ids: Vec<ServiceId>,
}

impl Venue {
    /// Create a venue with no blocked dates and no operating hours (closed every day)
    pub fn new(id: VenueId, name: LocalizedText, capacity: CapacityRange, price: Price) -> Self {
        Venue {
            id,
            name,
            description: LocalizedText::default(),
            address: String::new(),
            capacity,
            price,
            operating_hours: OperatingHours::new(),
            blocked_dates: Vec::new(),
            amenities: BTreeSet::new(),
            service_ids: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: LocalizedText) -> Self {
        self.description = description;
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_operating_hours(mut self, operating_hours: OperatingHours) -> Self {
        self.operating_hours = operating_hours;
        self
    }

    pub fn with_blocked_dates(mut self, blocked_dates: Vec<BlockedDateRange>) -> Self {
        self.blocked_dates = blocked_dates;
        self
    }

    pub fn with_amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenities = amenities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_service_ids(mut self, service_ids: Vec<ServiceId>) -> Self {
        self.service_ids = service_ids;
        self
    }

    pub fn name(&self) -> &LocalizedText {
        &self.name
    }

    pub fn description(&self) -> &LocalizedText {
        &self.description
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn capacity(&self) -> &CapacityRange {
        &self.capacity
    }

    pub fn price(&self) -> &Price {
        &self.price
    }

    pub fn operating_hours(&self) -> &OperatingHours {
        &self.operating_hours
    }

    pub fn blocked_dates(&self) -> &[BlockedDateRange] {
        &self.blocked_dates
    }

    pub fn amenities(&self) -> &BTreeSet<String> {
        &self.amenities
    }

    pub fn has_amenity(&self, amenity: &str) -> bool {
        self.amenities.contains(amenity)
    }

    /// Services that can be added to a booking of this venue
    pub fn service_ids(&self) -> &[ServiceId] {
        &self.service_ids
    }

    pub fn offers_service(&self, service_id: &ServiceId) -> bool {
        self.service_ids.contains(service_id)
    }
}

impl Entity for Venue {
    type Id = VenueId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// An add-on offering (catering, music, ...) attachable to a venue booking
#[derive(Debug, Clone)]
pub struct Service {
    id: ServiceId,
    name: LocalizedText,
    price: Price,
    duration_minutes: Option<u32>,
    max_capacity: Option<u32>,
}

impl Service {
    pub fn new(id: ServiceId, name: LocalizedText, price: Price) -> Self {
        Service {
            id,
            name,
            price,
            duration_minutes: None,
            max_capacity: None,
        }
    }

    pub fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn with_max_capacity(mut self, capacity: u32) -> Self {
        self.max_capacity = Some(capacity);
        self
    }

    pub fn name(&self) -> &LocalizedText {
        &self.name
    }

    pub fn price(&self) -> &Price {
        &self.price
    }

    /// Informational only; pricing always uses the booking's own duration
    pub fn duration_minutes(&self) -> Option<u32> {
        self.duration_minutes
    }

    pub fn max_capacity(&self) -> Option<u32> {
        self.max_capacity
    }
}

impl Entity for Service {
    type Id = ServiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
