pub mod catalog;
pub mod config;
pub mod logging;
pub mod persistence;

pub use catalog::{CatalogError, CatalogResult, JsonVenueCatalog};
pub use config::{BookingConfig, ConfigError, ConfigResult, Validate};
pub use logging::init_logger;
pub use persistence::{SqliteKeyValueStore, StoreError};
