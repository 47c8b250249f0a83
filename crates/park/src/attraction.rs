use serde::{Deserialize, Serialize};

use kennywood_core::{AreaId, AttractionId, DomainResult, Entity};

use crate::normalize_name;

/// A ride or show located in exactly one park area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attraction {
    pub id: AttractionId,
    pub name: String,
    pub area_id: AreaId,
}

impl Entity for Attraction {
    type Id = AttractionId;
    const KIND: &'static str = "attraction";
    const COLLECTION: &'static str = "attractions";

    fn id(&self) -> AttractionId {
        self.id
    }
}

/// Writable fields of an attraction.
///
/// `update` overwrites the whole draft; there is no partial form. Whether
/// `area_id` resolves is checked against the store by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttractionDraft {
    pub name: String,
    pub area_id: AreaId,
}

impl AttractionDraft {
    pub fn new(name: &str, area_id: AreaId) -> DomainResult<Self> {
        Ok(Self {
            name: normalize_name("name", name)?,
            area_id,
        })
    }

    pub fn into_record(self, id: AttractionId) -> Attraction {
        Attraction {
            id,
            name: self.name,
            area_id: self.area_id,
        }
    }
}

impl Attraction {
    pub fn in_area(&self, area_id: AreaId) -> bool {
        self.area_id == area_id
    }
}
