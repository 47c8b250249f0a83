//! Record store wiring and the lookups handlers share.

use std::collections::HashMap;
use std::sync::Arc;

use kennywood_core::{AreaId, AttractionId};
use kennywood_infra::store::{
    self, AreaRepository, AttractionRepository, InMemoryRepository, ItineraryRepository,
    PostgresAreaRepository, PostgresAttractionRepository, PostgresItineraryRepository,
};
use kennywood_infra::{StoreError, StoreResult};
use kennywood_park::{Area, Attraction, Itinerary};

use crate::config::ApiConfig;

/// Handles to the three repositories, shared by every request.
#[derive(Clone)]
pub struct AppServices {
    pub areas: Arc<dyn AreaRepository>,
    pub attractions: Arc<dyn AttractionRepository>,
    pub itineraries: Arc<dyn ItineraryRepository>,
}

/// Pick the store from config: Postgres when `DATABASE_URL` is set.
pub async fn build_services(config: &ApiConfig) -> StoreResult<AppServices> {
    match &config.database_url {
        Some(url) => {
            tracing::info!("using postgres record store");
            let pool = store::postgres::connect(url).await?;
            Ok(AppServices {
                areas: Arc::new(PostgresAreaRepository::new(pool.clone())),
                attractions: Arc::new(PostgresAttractionRepository::new(pool.clone())),
                itineraries: Arc::new(PostgresItineraryRepository::new(pool)),
            })
        }
        None => {
            tracing::info!("using in-memory record store");
            Ok(AppServices::in_memory())
        }
    }
}

impl AppServices {
    pub fn in_memory() -> Self {
        Self {
            areas: InMemoryRepository::<Area>::arc(),
            attractions: InMemoryRepository::<Attraction>::arc(),
            itineraries: InMemoryRepository::<Itinerary>::arc(),
        }
    }

    /// Area an attraction points at; `None` if it has since disappeared.
    pub async fn area_of(&self, attraction: &Attraction) -> StoreResult<Option<Area>> {
        optional(self.areas.get(attraction.area_id).await)
    }

    /// Attraction plus its area, for rendering an itinerary two levels deep.
    pub async fn attraction_with_area(
        &self,
        id: AttractionId,
    ) -> StoreResult<Option<(Attraction, Option<Area>)>> {
        let Some(attraction) = optional(self.attractions.get(id).await)? else {
            return Ok(None);
        };
        let area = self.area_of(&attraction).await?;
        Ok(Some((attraction, area)))
    }

    pub async fn area_index(&self) -> StoreResult<HashMap<AreaId, Area>> {
        Ok(self
            .areas
            .list()
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect())
    }

    pub async fn attraction_index(&self) -> StoreResult<HashMap<AttractionId, Attraction>> {
        Ok(self
            .attractions
            .list(None)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect())
    }

    /// A write must point at an existing area.
    pub async fn require_area(&self, id: AreaId) -> StoreResult<Area> {
        self.areas.get(id).await.map_err(as_reference)
    }

    /// A write must point at an existing attraction.
    pub async fn require_attraction(&self, id: AttractionId) -> StoreResult<Attraction> {
        self.attractions.get(id).await.map_err(as_reference)
    }

    /// Remove an attraction and every itinerary item booked on it, whoever
    /// owns them. Returns the number of itinerary items removed.
    pub async fn delete_attraction(&self, id: AttractionId) -> StoreResult<u64> {
        self.attractions.get(id).await?;
        let itineraries = self.itineraries.delete_for_attraction(id).await?;
        self.attractions.delete(id).await?;
        Ok(itineraries)
    }

    /// Remove an area together with its attractions (and their itinerary
    /// items). Returns the number of attractions removed.
    pub async fn delete_area(&self, id: AreaId) -> StoreResult<usize> {
        self.areas.get(id).await?;
        let residents = self.attractions.list(Some(id)).await?;
        for attraction in &residents {
            self.delete_attraction(attraction.id).await?;
        }
        self.areas.delete(id).await?;
        Ok(residents.len())
    }
}

fn optional<T>(res: StoreResult<T>) -> StoreResult<Option<T>> {
    match res {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// A missing referent in a request body is bad input, not a missing resource.
fn as_reference(err: StoreError) -> StoreError {
    match err {
        StoreError::NotFound { kind, id } => {
            StoreError::InvalidReference(format!("{kind} {id} does not exist"))
        }
        other => other,
    }
}
