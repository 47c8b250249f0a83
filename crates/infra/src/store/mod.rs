//! Repository abstractions over park records.
//!
//! One repository per entity type, each exposing `get`, `list`, `create`,
//! `save` and `delete`. Handlers branch on [`StoreError`] kinds instead of
//! catching generic failures.
//!
//! There is no isolation between requests: `get` followed by `save` on the
//! same record from two callers races, and the last write wins.

use async_trait::async_trait;
use thiserror::Error;

use kennywood_core::{AreaId, AttractionId, CustomerId, Entity, ItineraryId};
use kennywood_park::{Area, AreaDraft, Attraction, AttractionDraft, Itinerary, ItineraryDraft};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryRepository;
pub use postgres::{PostgresAreaRepository, PostgresAttractionRepository, PostgresItineraryRepository};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    /// A write pointed at a record that does not exist.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl StoreError {
    pub fn not_found<E: Entity>(id: E::Id) -> Self {
        Self::NotFound {
            kind: E::KIND,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[async_trait]
pub trait AreaRepository: Send + Sync {
    async fn get(&self, id: AreaId) -> StoreResult<Area>;

    async fn list(&self) -> StoreResult<Vec<Area>>;

    async fn create(&self, draft: AreaDraft) -> StoreResult<Area>;

    /// Overwrite an existing record. `NotFound` if it is gone.
    async fn save(&self, area: &Area) -> StoreResult<()>;

    async fn delete(&self, id: AreaId) -> StoreResult<()>;
}

#[async_trait]
pub trait AttractionRepository: Send + Sync {
    async fn get(&self, id: AttractionId) -> StoreResult<Attraction>;

    /// All attractions, or only those in `area` when given.
    async fn list(&self, area: Option<AreaId>) -> StoreResult<Vec<Attraction>>;

    async fn create(&self, draft: AttractionDraft) -> StoreResult<Attraction>;

    async fn save(&self, attraction: &Attraction) -> StoreResult<()>;

    async fn delete(&self, id: AttractionId) -> StoreResult<()>;
}

#[async_trait]
pub trait ItineraryRepository: Send + Sync {
    async fn get(&self, id: ItineraryId) -> StoreResult<Itinerary>;

    async fn list(&self) -> StoreResult<Vec<Itinerary>>;

    async fn create(&self, draft: ItineraryDraft, customer: CustomerId) -> StoreResult<Itinerary>;

    async fn save(&self, itinerary: &Itinerary) -> StoreResult<()>;

    async fn delete(&self, id: ItineraryId) -> StoreResult<()>;

    /// Remove every itinerary item pointing at `attraction`; returns how many went.
    async fn delete_for_attraction(&self, attraction: AttractionId) -> StoreResult<u64>;
}
