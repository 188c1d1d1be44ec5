//! Selection engine: bulk, all-or-nothing `is_selected` updates.

use std::collections::BTreeSet;

use chrono::Utc;

use voyage_core::MAX_SELECTED_PER_CATEGORY;
use voyage_core::identity::AuthenticatedCaller;
use voyage_core::requests::{CategorySelection, validate_selection_cap};

use crate::error::DatabaseError;
use crate::retry::with_retry;
use crate::service::{TechStackService, settle};

/// One row of the flattened update batch.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SelectionChange<'a> {
    category_id: &'a str,
    tech_id: &'a str,
    is_selected: bool,
}

fn flatten(categories: &[CategorySelection]) -> Vec<SelectionChange<'_>> {
    categories
        .iter()
        .flat_map(|category| {
            category.techs.iter().map(|tech| SelectionChange {
                category_id: &category.category_id,
                tech_id: &tech.tech_id,
                is_selected: tech.is_selected,
            })
        })
        .collect()
}

async fn selected_in_category(
    conn: &libsql::Connection,
    team_id: &str,
    category_id: &str,
) -> Result<usize, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT COUNT(*) FROM team_tech_stack_items
             WHERE voyage_team_id = ?1 AND category_id = ?2 AND is_selected = 1",
            [team_id, category_id],
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    usize::try_from(row.get::<i64>(0)?)
        .map_err(|e| DatabaseError::InvalidState(format!("negative selection count: {e}")))
}

async fn apply_in(
    conn: &libsql::Connection,
    team_id: &str,
    changes: &[SelectionChange<'_>],
) -> Result<(), DatabaseError> {
    let now = Utc::now().to_rfc3339();

    for change in changes {
        let updated = conn
            .execute(
                "UPDATE team_tech_stack_items SET is_selected = ?1, updated_at = ?2
                 WHERE id = ?3 AND voyage_team_id = ?4 AND category_id = ?5",
                libsql::params![
                    i64::from(change.is_selected),
                    now.as_str(),
                    change.tech_id,
                    team_id,
                    change.category_id
                ],
            )
            .await?;
        if updated == 0 {
            return Err(DatabaseError::NotFound {
                entity: "Tech stack item",
                key: format!(
                    "{} in category {} for team {team_id}",
                    change.tech_id, change.category_id
                ),
            });
        }
    }

    // The payload check only sees requested entries; items already selected
    // outside the payload still count toward the cap.
    let touched: BTreeSet<&str> = changes.iter().map(|c| c.category_id).collect();
    for category_id in touched {
        let selected = selected_in_category(conn, team_id, category_id).await?;
        if selected > MAX_SELECTED_PER_CATEGORY {
            return Err(DatabaseError::BadRequest(format!(
                "Category {category_id} would have {selected} selected tech items; at most {MAX_SELECTED_PER_CATEGORY} may be selected"
            )));
        }
    }
    Ok(())
}

impl TechStackService {
    /// Set `is_selected` on many tech items of `team_id` at once.
    ///
    /// The per-category cap is checked against the payload before any storage
    /// access. The batch is then applied in one immediate transaction; any
    /// failure rolls every change back.
    pub async fn update_selections(
        &self,
        team_id: &str,
        caller: &AuthenticatedCaller,
        categories: &[CategorySelection],
    ) -> Result<(), DatabaseError> {
        tracing::debug!(
            team_id,
            user_id = caller.user_id(),
            categories = categories.len(),
            "update_selections"
        );

        if let Err(error) = validate_selection_cap(categories, MAX_SELECTED_PER_CATEGORY) {
            tracing::warn!(team_id, %error, "selection cap exceeded");
            return Err(error.into());
        }

        self.require_member(caller, team_id).await?;

        let changes = flatten(categories);
        if changes.is_empty() {
            return Ok(());
        }

        with_retry(self.retry(), "update_selections", || {
            self.apply_selections_once(team_id, &changes)
        })
        .await?;

        tracing::info!(team_id, changes = changes.len(), "selections applied");
        Ok(())
    }

    async fn apply_selections_once(
        &self,
        team_id: &str,
        changes: &[SelectionChange<'_>],
    ) -> Result<(), DatabaseError> {
        let tx = self.begin_immediate().await?;
        let result = apply_in(&tx, team_id, changes).await;
        settle(tx, result).await
    }
}
