//! Vote ledger: casting and removing member votes on tech items.
//!
//! The `(team_tech_id, team_member_id)` unique constraint makes a second vote by
//! the same member a `Conflict`. Removing an item's last vote deletes the item
//! in the same transaction, so no item is ever left without votes.

use chrono::Utc;

use voyage_core::entities::TeamTechStackItemVote;
use voyage_core::identity::AuthenticatedCaller;
use voyage_core::ids::PREFIX_VOTE;
use voyage_core::responses::RemoveVoteOutcome;

use crate::error::DatabaseError;
use crate::helpers::{generate_id, map_unique_violation, parse_datetime};
use crate::repos::identity::member_id_for;
use crate::repos::proposal::find_team_item;
use crate::retry::with_retry;
use crate::service::{TechStackService, settle};

fn row_to_vote(row: &libsql::Row) -> Result<TeamTechStackItemVote, DatabaseError> {
    Ok(TeamTechStackItemVote {
        id: row.get::<String>(0)?,
        team_tech_id: row.get::<String>(1)?,
        team_member_id: row.get::<String>(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

async fn insert_vote(
    conn: &libsql::Connection,
    item_id: &str,
    member_id: &str,
) -> Result<TeamTechStackItemVote, DatabaseError> {
    let now = Utc::now();
    let id = generate_id(conn, PREFIX_VOTE).await?;

    map_unique_violation(
        conn.execute(
            "INSERT INTO team_tech_stack_item_votes (id, team_tech_id, team_member_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            libsql::params![id.as_str(), item_id, member_id, now.to_rfc3339()],
        )
        .await,
        || format!("Member {member_id} already voted for tech stack item {item_id}"),
    )?;

    Ok(TeamTechStackItemVote {
        id,
        team_tech_id: item_id.to_string(),
        team_member_id: member_id.to_string(),
        created_at: now,
        updated_at: now,
    })
}

/// Register the proposer's first vote on a freshly created item.
///
/// Must run on the transaction that created the item.
pub(crate) async fn cast_new_proposal_vote(
    tx: &libsql::Connection,
    item_id: &str,
    member_id: &str,
) -> Result<TeamTechStackItemVote, DatabaseError> {
    insert_vote(tx, item_id, member_id).await
}

pub(crate) async fn count_votes_on(
    conn: &libsql::Connection,
    item_id: &str,
) -> Result<u64, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT COUNT(*) FROM team_tech_stack_item_votes WHERE team_tech_id = ?1",
            [item_id],
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    u64::try_from(row.get::<i64>(0)?)
        .map_err(|e| DatabaseError::InvalidState(format!("negative vote count: {e}")))
}

async fn add_vote_in(
    conn: &libsql::Connection,
    team_id: &str,
    item_id: &str,
    user_id: &str,
) -> Result<TeamTechStackItemVote, DatabaseError> {
    if find_team_item(conn, item_id, team_id).await?.is_none() {
        return Err(DatabaseError::BadRequest(format!(
            "Tech stack item {item_id} not found for team {team_id}"
        )));
    }
    let member_id = member_id_for(conn, user_id, team_id)
        .await?
        .ok_or_else(|| DatabaseError::invalid_member(user_id, team_id))?;
    insert_vote(conn, item_id, &member_id).await
}

async fn remove_vote_in(
    conn: &libsql::Connection,
    item_id: &str,
    member_id: &str,
) -> Result<RemoveVoteOutcome, DatabaseError> {
    let deleted = conn
        .execute(
            "DELETE FROM team_tech_stack_item_votes WHERE team_tech_id = ?1 AND team_member_id = ?2",
            [item_id, member_id],
        )
        .await?;
    if deleted == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Vote",
            key: format!("tech stack item {item_id}, member {member_id}"),
        });
    }

    if count_votes_on(conn, item_id).await? > 0 {
        return Ok(RemoveVoteOutcome::VoteDeleted);
    }

    conn.execute("DELETE FROM team_tech_stack_items WHERE id = ?1", [item_id])
        .await?;
    Ok(RemoveVoteOutcome::VoteAndItemDeleted)
}

impl TechStackService {
    /// Cast the caller's vote for a tech item of `team_id`.
    ///
    /// The item check, membership lookup, and insert share one immediate
    /// transaction, so the vote cannot land on an item that a concurrent
    /// `remove_vote` just deleted.
    pub async fn add_vote(
        &self,
        team_id: &str,
        item_id: &str,
        caller: &AuthenticatedCaller,
    ) -> Result<TeamTechStackItemVote, DatabaseError> {
        tracing::debug!(team_id, item_id, user_id = caller.user_id(), "add_vote");

        let vote = with_retry(self.retry(), "add_vote", || {
            self.add_vote_once(team_id, item_id, caller)
        })
        .await?;

        tracing::info!(
            vote_id = %vote.id,
            item_id,
            member_id = %vote.team_member_id,
            "vote cast"
        );
        Ok(vote)
    }

    async fn add_vote_once(
        &self,
        team_id: &str,
        item_id: &str,
        caller: &AuthenticatedCaller,
    ) -> Result<TeamTechStackItemVote, DatabaseError> {
        let tx = self.begin_immediate().await?;
        let result = add_vote_in(&tx, team_id, item_id, caller.user_id()).await;
        settle(tx, result).await
    }

    /// Remove the caller's vote for a tech item, deleting the item if that was
    /// its last vote.
    pub async fn remove_vote(
        &self,
        team_id: &str,
        item_id: &str,
        caller: &AuthenticatedCaller,
    ) -> Result<RemoveVoteOutcome, DatabaseError> {
        tracing::debug!(team_id, item_id, user_id = caller.user_id(), "remove_vote");
        let member_id = self.require_member(caller, team_id).await?;

        let outcome = with_retry(self.retry(), "remove_vote", || {
            self.remove_vote_once(item_id, &member_id)
        })
        .await?;

        if outcome.item_deleted() {
            tracing::info!(item_id, %member_id, "last vote removed, tech stack item deleted");
        } else {
            tracing::info!(item_id, %member_id, "vote removed");
        }
        Ok(outcome)
    }

    async fn remove_vote_once(
        &self,
        item_id: &str,
        member_id: &str,
    ) -> Result<RemoveVoteOutcome, DatabaseError> {
        let tx = self.begin_immediate().await?;
        let result = remove_vote_in(&tx, item_id, member_id).await;
        settle(tx, result).await
    }

    /// Number of votes currently recorded for an item.
    pub async fn count_votes(&self, item_id: &str) -> Result<u64, DatabaseError> {
        let conn = self.db().connect().await?;
        count_votes_on(&conn, item_id).await
    }

    /// All votes for an item, oldest first.
    pub async fn list_votes(
        &self,
        item_id: &str,
    ) -> Result<Vec<TeamTechStackItemVote>, DatabaseError> {
        let conn = self.db().connect().await?;
        let mut rows = conn
            .query(
                "SELECT id, team_tech_id, team_member_id, created_at, updated_at
                 FROM team_tech_stack_item_votes WHERE team_tech_id = ?1
                 ORDER BY created_at, rowid",
                [item_id],
            )
            .await?;

        let mut votes = Vec::new();
        while let Some(row) = rows.next().await? {
            votes.push(row_to_vote(&row)?);
        }
        Ok(votes)
    }
}
