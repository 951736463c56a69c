/// Base DDD abstractions for the booking domain
use std::fmt::Debug;
use thiserror::Error;

/// Trait for value objects - immutable objects defined by their attributes
/// Value objects are equal if all their attributes are equal
pub trait ValueObject: Clone + PartialEq + Debug {}

/// Trait for entities - objects with identity
/// Entities are equal if their IDs are equal, regardless of other attributes
pub trait Entity: Debug {
    type Id: ValueObject;

    fn id(&self) -> &Self::Id;
}

/// Trait for aggregate roots - entities that are the entry point to an aggregate
/// All state changes go through `apply_event` so the aggregate stays consistent
pub trait AggregateRoot: Entity {
    type Event: DomainEvent;

    /// Apply a domain event and update the aggregate state
    fn apply_event(&mut self, event: &Self::Event);
}

/// Trait for domain events - things that have happened in the domain
pub trait DomainEvent: Debug + Clone {
    /// The name/type of the event
    fn event_type(&self) -> &'static str;

    fn aggregate_id(&self) -> String;
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The availability scan reached its cap without finding an open date
    #[error("No availability found for venue {venue_id} within {searched_days} days")]
    NoAvailability { venue_id: String, searched_days: u32 },
}
