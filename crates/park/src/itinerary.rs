use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kennywood_core::{AttractionId, CustomerId, DomainError, DomainResult, Entity, ItineraryId};

/// A planned visit: one customer, one attraction, one start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    pub id: ItineraryId,
    pub starttime: DateTime<Utc>,
    pub attraction_id: AttractionId,
    pub customer_id: CustomerId,
}

impl Entity for Itinerary {
    type Id = ItineraryId;
    const KIND: &'static str = "itinerary";
    const COLLECTION: &'static str = "itineraries";

    fn id(&self) -> ItineraryId {
        self.id
    }
}

/// Writable fields of an itinerary item.
///
/// The owning customer is not part of the draft; it comes from the
/// authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryDraft {
    pub starttime: DateTime<Utc>,
    pub attraction_id: AttractionId,
}

impl ItineraryDraft {
    pub fn new(starttime: DateTime<Utc>, attraction_id: AttractionId) -> Self {
        Self {
            starttime,
            attraction_id,
        }
    }

    pub fn into_record(self, id: ItineraryId, customer_id: CustomerId) -> Itinerary {
        Itinerary {
            id,
            starttime: self.starttime,
            attraction_id: self.attraction_id,
            customer_id,
        }
    }
}

impl Itinerary {
    pub fn is_owned_by(&self, customer_id: CustomerId) -> bool {
        self.customer_id == customer_id
    }

    /// Ownership is fixed at creation; only the owner may change or remove it.
    pub fn ensure_owned_by(&self, caller: CustomerId) -> DomainResult<()> {
        if self.is_owned_by(caller) {
            Ok(())
        } else {
            Err(DomainError::forbidden(format!(
                "itinerary {} belongs to another customer",
                self.id
            )))
        }
    }

    /// Full overwrite of the writable fields on behalf of `caller`.
    pub fn overwrite(&self, draft: ItineraryDraft, caller: CustomerId) -> DomainResult<Itinerary> {
        self.ensure_owned_by(caller)?;
        Ok(draft.into_record(self.id, caller))
    }
}
