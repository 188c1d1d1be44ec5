use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A candidate technology proposed by one team within one category.
///
/// `name` is unique per `(voyage_team_id, category_id)`. An item never exists
/// without at least one vote.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TeamTechStackItem {
    pub id: String,
    pub name: String,
    pub voyage_team_id: String,
    pub category_id: String,
    pub is_selected: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
