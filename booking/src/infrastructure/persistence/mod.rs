mod schema;
mod sqlite_key_value_store;

pub use schema::initialize_database;
pub use sqlite_key_value_store::{SqliteKeyValueStore, StoreError, StoreResult};
