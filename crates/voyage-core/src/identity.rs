use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The authenticated caller of an operation.
///
/// Built once at the boundary from whatever authentication produced, then passed
/// by value into the service. Carries only the persistent user identifier; team
/// membership is resolved per operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct AuthenticatedCaller {
    pub user_id: String,
}

impl AuthenticatedCaller {
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}
