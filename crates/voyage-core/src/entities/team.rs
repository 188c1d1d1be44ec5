use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A cohort group whose members share a technology catalog.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VoyageTeam {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
