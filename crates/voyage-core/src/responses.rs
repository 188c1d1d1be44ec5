//! Operation results and the catalog read-model.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{TeamTechStackItem, TeamTechStackItemVote};

/// Result of `propose_tech`: the new item together with its creator's first vote.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProposalResult {
    pub tech_item: TeamTechStackItem,
    pub vote: TeamTechStackItemVote,
}

/// What `remove_vote` ended up deleting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RemoveVoteOutcome {
    /// The vote was deleted and the item still has other votes.
    VoteDeleted,
    /// The vote was the item's last one, so the item was deleted too.
    VoteAndItemDeleted,
}

impl RemoveVoteOutcome {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::VoteDeleted => "vote was deleted",
            Self::VoteAndItemDeleted => "vote and tech stack item were deleted",
        }
    }

    #[must_use]
    pub const fn item_deleted(self) -> bool {
        matches!(self, Self::VoteAndItemDeleted)
    }
}

/// One category of a team's catalog with that team's items.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CatalogCategory {
    pub id: String,
    pub name: String,
    pub description: String,
    pub items: Vec<CatalogItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub is_selected: bool,
    pub voters: Vec<VoterSummary>,
}

/// Display data for one member who voted for an item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VoterSummary {
    pub member_id: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub voted_at: DateTime<Utc>,
}
