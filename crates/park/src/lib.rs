//! Park domain module (areas, attractions, itinerary items).
//!
//! This crate contains the records and write rules of the park, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod area;
pub mod attraction;
pub mod itinerary;

pub use area::{Area, AreaDraft};
pub use attraction::{Attraction, AttractionDraft};
pub use itinerary::{Itinerary, ItineraryDraft};

use kennywood_core::{DomainError, DomainResult};

/// Shared rule for display names: trimmed and non-empty.
pub(crate) fn normalize_name(field: &str, raw: &str) -> DomainResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::validation(format!("{field} must not be empty")));
    }
    Ok(name.to_string())
}
