//! In-memory repositories for tests/dev.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use kennywood_core::{AreaId, AttractionId, CustomerId, Entity, ItineraryId};
use kennywood_park::{Area, AreaDraft, Attraction, AttractionDraft, Itinerary, ItineraryDraft};

use super::{AreaRepository, AttractionRepository, ItineraryRepository, StoreError, StoreResult};

/// One table of records keyed by id, with a store-assigned id sequence.
///
/// Ids start at 1 and are never reused, even after deletes.
#[derive(Debug)]
pub struct InMemoryRepository<R: Entity> {
    rows: RwLock<BTreeMap<R::Id, R>>,
    last_id: AtomicI64,
}

impl<R: Entity> InMemoryRepository<R> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            last_id: AtomicI64::new(0),
        }
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, BTreeMap<R::Id, R>>> {
        self.rows
            .read()
            .map_err(|_| StoreError::Storage(format!("{} table lock poisoned", R::KIND)))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, BTreeMap<R::Id, R>>> {
        self.rows
            .write()
            .map_err(|_| StoreError::Storage(format!("{} table lock poisoned", R::KIND)))
    }
}

impl<R: Entity> Default for InMemoryRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Entity + Clone> InMemoryRepository<R> {
    fn fetch(&self, id: R::Id) -> StoreResult<R> {
        self.read()?
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found::<R>(id))
    }

    fn select(&self, keep: impl Fn(&R) -> bool) -> StoreResult<Vec<R>> {
        Ok(self.read()?.values().filter(|r| keep(r)).cloned().collect())
    }

    fn remove_where(&self, matches: impl Fn(&R) -> bool) -> StoreResult<u64> {
        let mut rows = self.write()?;
        let before = rows.len();
        rows.retain(|_, r| !matches(r));
        Ok((before - rows.len()) as u64)
    }

    fn insert_with(&self, build: impl FnOnce(R::Id) -> R) -> StoreResult<R> {
        let mut rows = self.write()?;
        let id = R::Id::from(self.last_id.fetch_add(1, Ordering::SeqCst) + 1);
        let record = build(id);
        rows.insert(id, record.clone());
        Ok(record)
    }

    fn replace(&self, record: &R) -> StoreResult<()> {
        let mut rows = self.write()?;
        match rows.get_mut(&record.id()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(())
            }
            None => Err(StoreError::not_found::<R>(record.id())),
        }
    }

    fn remove(&self, id: R::Id) -> StoreResult<()> {
        self.write()?
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found::<R>(id))
    }
}

#[async_trait]
impl AreaRepository for InMemoryRepository<Area> {
    async fn get(&self, id: AreaId) -> StoreResult<Area> {
        self.fetch(id)
    }

    async fn list(&self) -> StoreResult<Vec<Area>> {
        self.select(|_| true)
    }

    async fn create(&self, draft: AreaDraft) -> StoreResult<Area> {
        self.insert_with(|id| draft.into_record(id))
    }

    async fn save(&self, area: &Area) -> StoreResult<()> {
        self.replace(area)
    }

    async fn delete(&self, id: AreaId) -> StoreResult<()> {
        self.remove(id)
    }
}

#[async_trait]
impl AttractionRepository for InMemoryRepository<Attraction> {
    async fn get(&self, id: AttractionId) -> StoreResult<Attraction> {
        self.fetch(id)
    }

    async fn list(&self, area: Option<AreaId>) -> StoreResult<Vec<Attraction>> {
        match area {
            Some(area_id) => self.select(|a| a.in_area(area_id)),
            None => self.select(|_| true),
        }
    }

    async fn create(&self, draft: AttractionDraft) -> StoreResult<Attraction> {
        self.insert_with(|id| draft.into_record(id))
    }

    async fn save(&self, attraction: &Attraction) -> StoreResult<()> {
        self.replace(attraction)
    }

    async fn delete(&self, id: AttractionId) -> StoreResult<()> {
        self.remove(id)
    }
}

#[async_trait]
impl ItineraryRepository for InMemoryRepository<Itinerary> {
    async fn get(&self, id: ItineraryId) -> StoreResult<Itinerary> {
        self.fetch(id)
    }

    async fn list(&self) -> StoreResult<Vec<Itinerary>> {
        self.select(|_| true)
    }

    async fn create(&self, draft: ItineraryDraft, customer: CustomerId) -> StoreResult<Itinerary> {
        self.insert_with(|id| draft.into_record(id, customer))
    }

    async fn save(&self, itinerary: &Itinerary) -> StoreResult<()> {
        self.replace(itinerary)
    }

    async fn delete(&self, id: ItineraryId) -> StoreResult<()> {
        self.remove(id)
    }

    async fn delete_for_attraction(&self, attraction: AttractionId) -> StoreResult<u64> {
        self.remove_where(|i| i.attraction_id == attraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn draft(name: &str, area: i64) -> AttractionDraft {
        AttractionDraft::new(name, AreaId::new(area)).unwrap()
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids_and_get_returns_record() {
        let store = InMemoryRepository::<Attraction>::new();

        let first = store.create(draft("Jack Rabbit", 1)).await.unwrap();
        let second = store.create(draft("Phantom's Revenge", 2)).await.unwrap();

        assert_eq!(first.id, AttractionId::new(1));
        assert_eq!(second.id, AttractionId::new(2));

        let fetched = store.get(second.id).await.unwrap();
        assert_eq!(fetched, second);
    }

    #[tokio::test]
    async fn list_filters_by_area() {
        let store = InMemoryRepository::<Attraction>::new();
        store.create(draft("Thunderbolt", 1)).await.unwrap();
        store.create(draft("Racer", 2)).await.unwrap();
        store.create(draft("Jack Rabbit", 1)).await.unwrap();

        let all = store.list(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let area_one = store.list(Some(AreaId::new(1))).await.unwrap();
        let names: Vec<_> = area_one.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Thunderbolt", "Jack Rabbit"]);

        let none = store.list(Some(AreaId::new(99))).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn missing_records_report_not_found() {
        let store = InMemoryRepository::<Attraction>::new();
        let ghost = draft("Ghost", 1).into_record(AttractionId::new(9999));

        let err = store.get(ghost.id).await.unwrap_err();
        assert_eq!(err, StoreError::NotFound { kind: "attraction", id: 9999 });
        assert!(store.save(&ghost).await.unwrap_err().is_not_found());
        assert!(store.delete(ghost.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found_and_ids_are_not_reused() {
        let store = InMemoryRepository::<Area>::new();
        let area = store.create(AreaDraft::new("Lost Kennywood").unwrap()).await.unwrap();

        store.delete(area.id).await.unwrap();
        assert!(store.get(area.id).await.unwrap_err().is_not_found());

        let next = store.create(AreaDraft::new("Kiddieland").unwrap()).await.unwrap();
        assert_ne!(next.id, area.id);
    }

    #[tokio::test]
    async fn delete_for_attraction_removes_only_matching_items() {
        let store = InMemoryRepository::<Itinerary>::new();
        let at = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        for (attraction, customer) in [(5, 1), (6, 1), (5, 2)] {
            store
                .create(
                    ItineraryDraft::new(at, AttractionId::new(attraction)),
                    CustomerId::new(customer),
                )
                .await
                .unwrap();
        }

        let removed = store.delete_for_attraction(AttractionId::new(5)).await.unwrap();
        assert_eq!(removed, 2);

        let left = store.list().await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].attraction_id, AttractionId::new(6));
        assert_eq!(left[0].customer_id, CustomerId::new(1));

        assert_eq!(store.delete_for_attraction(AttractionId::new(5)).await.unwrap(), 0);
    }

    proptest! {
        #[test]
        fn saving_the_same_state_twice_is_idempotent(
            name in "[A-Za-z][A-Za-z ]{0,15}[A-Za-z]",
            area in 1i64..50,
        ) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            rt.block_on(async {
                let store = InMemoryRepository::<Attraction>::new();
                let created = store.create(draft("Initial", 1)).await.unwrap();
                let updated = draft(&name, area).into_record(created.id);

                store.save(&updated).await.unwrap();
                let once = store.get(created.id).await.unwrap();
                store.save(&updated).await.unwrap();
                let twice = store.get(created.id).await.unwrap();

                assert_eq!(once, twice);
                assert_eq!(twice, updated);
            });
        }
    }
}
