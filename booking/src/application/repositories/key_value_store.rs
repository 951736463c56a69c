use crate::domain::DomainResult;
use std::collections::HashMap;

/// String key-value storage for small pieces of client state (favorites)
pub trait KeyValueStore {
    /// Returns `Ok(None)` when the key has never been set or was cleared.
    fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> DomainResult<()>;

    /// Removes the key; clearing a missing key is not an error.
    fn clear(&mut self, key: &str) -> DomainResult<()>;
}

/// Process-local store, mainly for tests and demos
#[derive(Debug, Default, Clone)]
pub struct InMemoryKeyValueStore {
    entries: HashMap<String, String>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> DomainResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> DomainResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
