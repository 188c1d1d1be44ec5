use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A user's membership in one team. This is the unit of voting identity.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VoyageTeamMember {
    pub id: String,
    pub user_id: String,
    pub voyage_team_id: String,
    pub created_at: DateTime<Utc>,
}
