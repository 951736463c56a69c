use crate::application::repositories::KeyValueStore;
use crate::domain::{base::DomainError, value_objects::VenueId, DomainResult};

/// Store key holding the JSON array of favorite venue ids
pub const FAVORITES_KEY: &str = "favorites";

/// Use case for the user's favorite venues
///
/// Favorites live in a key-value store as a JSON array of venue ids, in the
/// order they were added. A corrupt stored value reads as an empty list.
pub struct FavoriteVenues<'a, S: KeyValueStore> {
    store: &'a mut S,
}

impl<'a, S: KeyValueStore> FavoriteVenues<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    pub fn list(&self) -> DomainResult<Vec<VenueId>> {
        let Some(raw) = self.store.get(FAVORITES_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(ids) => Ok(ids),
            Err(e) => {
                tracing::warn!("Ignoring corrupt favorites value '{}': {}", raw, e);
                Ok(Vec::new())
            }
        }
    }

    pub fn is_favorite(&self, venue_id: &VenueId) -> DomainResult<bool> {
        Ok(self.list()?.contains(venue_id))
    }

    /// Add or remove a venue; returns whether it is a favorite afterwards
    pub fn toggle(&mut self, venue_id: &VenueId) -> DomainResult<bool> {
        let mut ids = self.list()?;
        let now_favorite = match ids.iter().position(|id| id == venue_id) {
            Some(index) => {
                ids.remove(index);
                false
            }
            None => {
                ids.push(venue_id.clone());
                true
            }
        };
        self.save(&ids)?;

        tracing::debug!(
            "Venue {} {} favorites",
            venue_id,
            if now_favorite { "added to" } else { "removed from" }
        );
        Ok(now_favorite)
    }

    pub fn clear(&mut self) -> DomainResult<()> {
        self.store.clear(FAVORITES_KEY)
    }

    fn save(&mut self, ids: &[VenueId]) -> DomainResult<()> {
        let raw = serde_json::to_string(ids)
            .map_err(|e| DomainError::InvalidOperation(format!("Cannot encode favorites: {}", e)))?;
        self.store.set(FAVORITES_KEY, &raw)
    }
}
