/// JSON-backed venue catalog
use crate::application::dto::CatalogDto;
use crate::application::repositories::VenueRepository;
use crate::domain::base::{DomainError, Entity};
use crate::domain::entities::{Service, Venue};
use crate::domain::value_objects::{ServiceId, VenueId};
use crate::domain::DomainResult;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid catalog entry {id}: {source}")]
    InvalidEntry {
        id: String,
        #[source]
        source: DomainError,
    },

    #[error("Duplicate catalog id: {0}")]
    Duplicate(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Venues and services read from a JSON document
///
/// Entries are normalized into domain types once, at load time. Venues keep
/// the order they appear in the document.
#[derive(Debug, Clone, Default)]
pub struct JsonVenueCatalog {
    venues: Vec<Venue>,
    venue_index: HashMap<VenueId, usize>,
    services: HashMap<ServiceId, Service>,
}

impl JsonVenueCatalog {
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let dto: CatalogDto = serde_json::from_str(json)?;
        Self::from_dto(dto)
    }

    /// Read and parse a catalog file without blocking the runtime
    pub async fn load_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(
            "Loaded {} venue(s) and {} service(s) from {}",
            catalog.venues.len(),
            catalog.services.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_dto(dto: CatalogDto) -> CatalogResult<Self> {
        let mut catalog = JsonVenueCatalog::default();

        for service_dto in dto.services {
            let id = service_dto.id.clone();
            let service = Service::try_from(service_dto)
                .map_err(|source| CatalogError::InvalidEntry { id: id.clone(), source })?;
            if catalog.services.insert(service.id().clone(), service).is_some() {
                return Err(CatalogError::Duplicate(id));
            }
        }

        for venue_dto in dto.venues {
            let id = venue_dto.id.clone();
            let venue = Venue::try_from(venue_dto)
                .map_err(|source| CatalogError::InvalidEntry { id: id.clone(), source })?;
            if catalog.venue_index.contains_key(venue.id()) {
                return Err(CatalogError::Duplicate(id));
            }
            for service_id in venue.service_ids() {
                if !catalog.services.contains_key(service_id) {
                    tracing::warn!("Venue {} lists unknown service {}", venue.id(), service_id);
                }
            }
            catalog.venue_index.insert(venue.id().clone(), catalog.venues.len());
            catalog.venues.push(venue);
        }

        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    pub fn service(&self, id: &ServiceId) -> Option<&Service> {
        self.services.get(id)
    }
}

impl VenueRepository for JsonVenueCatalog {
    fn find_by_id(&self, id: &VenueId) -> DomainResult<Option<Venue>> {
        Ok(self
            .venue_index
            .get(id)
            .and_then(|index| self.venues.get(*index))
            .cloned())
    }

    fn find_all(&self) -> DomainResult<Vec<Venue>> {
        Ok(self.venues.clone())
    }

    fn find_services(&self, venue_id: &VenueId) -> DomainResult<Vec<Service>> {
        let venue = self
            .venue_index
            .get(venue_id)
            .and_then(|index| self.venues.get(*index))
            .ok_or_else(|| DomainError::NotFound(format!("Venue {} not found", venue_id)))?;

        Ok(venue
            .service_ids()
            .iter()
            .filter_map(|id| self.services.get(id))
            .cloned()
            .collect())
    }
}
