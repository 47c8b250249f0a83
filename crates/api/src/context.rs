use kennywood_auth::PrincipalId;
use kennywood_core::CustomerId;

/// Principal context for a request (authenticated identity).
///
/// Inserted by the auth middleware and handed to handlers as an explicit
/// argument; handlers never look the caller up anywhere else.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal_id: PrincipalId,
}

impl PrincipalContext {
    pub fn new(principal_id: PrincipalId) -> Self {
        Self { principal_id }
    }

    pub fn principal_id(&self) -> PrincipalId {
        self.principal_id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.principal_id.customer_id()
    }
}
