//! Tech proposal service: team-scoped tech items and their creation.

use chrono::Utc;

use voyage_core::entities::TeamTechStackItem;
use voyage_core::identity::AuthenticatedCaller;
use voyage_core::ids::PREFIX_TECH_ITEM;
use voyage_core::requests::normalize_tech_name;
use voyage_core::responses::ProposalResult;

use crate::error::DatabaseError;
use crate::helpers::{generate_id, get_bool, map_unique_violation, parse_datetime};
use crate::repos::roster::category_exists;
use crate::repos::vote::cast_new_proposal_vote;
use crate::retry::with_retry;
use crate::service::{TechStackService, settle};

const ITEM_COLUMNS: &str =
    "id, name, voyage_team_id, category_id, is_selected, created_at, updated_at";

fn row_to_item(row: &libsql::Row) -> Result<TeamTechStackItem, DatabaseError> {
    Ok(TeamTechStackItem {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        voyage_team_id: row.get::<String>(2)?,
        category_id: row.get::<String>(3)?,
        is_selected: get_bool(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

/// Fetch an item only if it belongs to `team_id`.
pub(crate) async fn find_team_item(
    conn: &libsql::Connection,
    item_id: &str,
    team_id: &str,
) -> Result<Option<TeamTechStackItem>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {ITEM_COLUMNS} FROM team_tech_stack_items WHERE id = ?1 AND voyage_team_id = ?2"
            ),
            [item_id, team_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_item(&row)?)),
        None => Ok(None),
    }
}

async fn propose_in(
    conn: &libsql::Connection,
    team_id: &str,
    member_id: &str,
    name: &str,
    category_id: &str,
) -> Result<ProposalResult, DatabaseError> {
    if !category_exists(conn, category_id).await? {
        return Err(DatabaseError::NotFound {
            entity: "Tech category",
            key: category_id.to_string(),
        });
    }

    let now = Utc::now();
    let id = generate_id(conn, PREFIX_TECH_ITEM).await?;

    map_unique_violation(
        conn.execute(
            "INSERT INTO team_tech_stack_items (id, name, voyage_team_id, category_id, is_selected, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5)",
            libsql::params![id.as_str(), name, team_id, category_id, now.to_rfc3339()],
        )
        .await,
        || format!("Tech stack item '{name}' already proposed in category {category_id} for team {team_id}"),
    )?;

    let vote = cast_new_proposal_vote(conn, &id, member_id).await?;

    Ok(ProposalResult {
        tech_item: TeamTechStackItem {
            id,
            name: name.to_string(),
            voyage_team_id: team_id.to_string(),
            category_id: category_id.to_string(),
            is_selected: false,
            created_at: now,
            updated_at: now,
        },
        vote,
    })
}

impl TechStackService {
    /// Propose a new tech item for `team_id` in `category_id`, registering the
    /// caller's first vote with it.
    ///
    /// Item and vote are written in one transaction: either both exist
    /// afterwards or neither does.
    pub async fn propose_tech(
        &self,
        team_id: &str,
        caller: &AuthenticatedCaller,
        tech_name: &str,
        category_id: &str,
    ) -> Result<ProposalResult, DatabaseError> {
        tracing::debug!(team_id, category_id, tech_name, user_id = caller.user_id(), "propose_tech");

        let member_id = self.require_member(caller, team_id).await?;
        let name = normalize_tech_name(tech_name)?;

        let result = with_retry(self.retry(), "propose_tech", || {
            self.propose_once(team_id, &member_id, &name, category_id)
        })
        .await?;

        tracing::info!(
            item_id = %result.tech_item.id,
            vote_id = %result.vote.id,
            team_id,
            category_id,
            name = %result.tech_item.name,
            "tech proposed"
        );
        Ok(result)
    }

    async fn propose_once(
        &self,
        team_id: &str,
        member_id: &str,
        name: &str,
        category_id: &str,
    ) -> Result<ProposalResult, DatabaseError> {
        let tx = self.begin_immediate().await?;
        let result = propose_in(&tx, team_id, member_id, name, category_id).await;
        settle(tx, result).await
    }

    pub async fn get_tech_item(&self, item_id: &str) -> Result<TeamTechStackItem, DatabaseError> {
        let conn = self.db().connect().await?;
        let mut rows = conn
            .query(
                &format!("SELECT {ITEM_COLUMNS} FROM team_tech_stack_items WHERE id = ?1"),
                [item_id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| DatabaseError::NotFound {
            entity: "Tech stack item",
            key: item_id.to_string(),
        })?;
        row_to_item(&row)
    }

    /// All items of a team, oldest first.
    pub async fn list_team_items(
        &self,
        team_id: &str,
    ) -> Result<Vec<TeamTechStackItem>, DatabaseError> {
        let conn = self.db().connect().await?;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {ITEM_COLUMNS} FROM team_tech_stack_items
                     WHERE voyage_team_id = ?1 ORDER BY created_at, name"
                ),
                [team_id],
            )
            .await?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_item(&row)?);
        }
        Ok(items)
    }
}
