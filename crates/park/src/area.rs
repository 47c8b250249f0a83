use serde::{Deserialize, Serialize};

use kennywood_core::{AreaId, DomainResult, Entity};

use crate::normalize_name;

/// A themed section of the park that attractions belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub id: AreaId,
    pub name: String,
}

impl Entity for Area {
    type Id = AreaId;
    const KIND: &'static str = "area";
    const COLLECTION: &'static str = "areas";

    fn id(&self) -> AreaId {
        self.id
    }
}

/// Writable fields of an area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaDraft {
    pub name: String,
}

impl AreaDraft {
    pub fn new(name: &str) -> DomainResult<Self> {
        Ok(Self {
            name: normalize_name("name", name)?,
        })
    }

    pub fn into_record(self, id: AreaId) -> Area {
        Area { id, name: self.name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kennywood_core::DomainError;

    #[test]
    fn draft_trims_name() {
        let draft = AreaDraft::new("  Kiddieland ").unwrap();
        assert_eq!(draft.name, "Kiddieland");
        assert_eq!(
            draft.into_record(AreaId::new(4)),
            Area { id: AreaId::new(4), name: "Kiddieland".into() }
        );
    }

    #[test]
    fn draft_rejects_blank_name() {
        assert!(matches!(AreaDraft::new("   "), Err(DomainError::Validation(_))));
    }
}
