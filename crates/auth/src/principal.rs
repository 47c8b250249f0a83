use core::str::FromStr;
use serde::{Deserialize, Serialize};

use kennywood_core::{CustomerId, DomainError};

/// Identity of an authenticated principal.
///
/// Every principal this service accepts is a park customer; the numeric id is
/// shared with the customer record kept by the identity provider.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(i64);

impl PrincipalId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    /// Customer identity this principal acts as.
    pub fn customer_id(self) -> CustomerId {
        CustomerId::new(self.0)
    }
}

impl core::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for PrincipalId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for PrincipalId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let customer: CustomerId = s.parse()?;
        Ok(Self(customer.get()))
    }
}
