//! Infrastructure layer: record storage for the park domain.

pub mod store;

pub use store::{
    AreaRepository, AttractionRepository, InMemoryRepository, ItineraryRepository, StoreError,
    StoreResult,
};
