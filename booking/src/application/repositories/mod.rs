mod key_value_store;
mod venue_repository;

pub use key_value_store::{InMemoryKeyValueStore, KeyValueStore};
pub use venue_repository::VenueRepository;
