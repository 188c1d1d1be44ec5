//! Tech catalog reader: every category with one team's items and voters.

use voyage_core::responses::{CatalogCategory, CatalogItem, VoterSummary};

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_string, parse_datetime};
use crate::service::TechStackService;

/// Categories are all listed; items are restricted to the team in the join
/// condition so empty categories still produce a row.
const CATALOG_QUERY: &str = "
    SELECT c.id, c.name, c.description,
           i.id, i.name, i.is_selected,
           m.id, u.id, u.first_name, u.last_name, u.avatar, v.created_at
    FROM tech_categories c
    LEFT JOIN team_tech_stack_items i
        ON i.category_id = c.id AND i.voyage_team_id = ?1
    LEFT JOIN team_tech_stack_item_votes v ON v.team_tech_id = i.id
    LEFT JOIN voyage_team_members m ON m.id = v.team_member_id
    LEFT JOIN users u ON u.id = m.user_id
    ORDER BY c.name, c.id, i.created_at, i.name, i.id, v.created_at, v.rowid";

fn row_to_voter(row: &libsql::Row) -> Result<Option<VoterSummary>, DatabaseError> {
    let Some(member_id) = get_opt_string(row, 6)? else {
        return Ok(None);
    };
    Ok(Some(VoterSummary {
        member_id,
        user_id: row.get::<String>(7)?,
        first_name: row.get::<String>(8)?,
        last_name: row.get::<String>(9)?,
        avatar: get_opt_string(row, 10)?,
        voted_at: parse_datetime(&row.get::<String>(11)?)?,
    }))
}

/// Fold the flat join rows into the nested catalog, preserving query order.
fn push_row(
    catalog: &mut Vec<CatalogCategory>,
    row: &libsql::Row,
) -> Result<(), DatabaseError> {
    let category_id = row.get::<String>(0)?;
    if catalog.last().is_none_or(|c| c.id != category_id) {
        catalog.push(CatalogCategory {
            id: category_id,
            name: row.get::<String>(1)?,
            description: row.get::<String>(2)?,
            items: Vec::new(),
        });
    }
    let Some(category) = catalog.last_mut() else {
        return Err(DatabaseError::InvalidState("catalog fold lost its category".into()));
    };

    let Some(item_id) = get_opt_string(row, 3)? else {
        return Ok(());
    };
    if category.items.last().is_none_or(|i| i.id != item_id) {
        category.items.push(CatalogItem {
            id: item_id,
            name: row.get::<String>(4)?,
            is_selected: get_bool(row, 5)?,
            voters: Vec::new(),
        });
    }

    if let Some(voter) = row_to_voter(row)? {
        if let Some(item) = category.items.last_mut() {
            item.voters.push(voter);
        }
    }
    Ok(())
}

impl TechStackService {
    /// Return every tech category with `team_id`'s items and who voted for them.
    ///
    /// Categories are ordered by name, items by creation time, voters by
    /// vote time. Categories without items for the team are included with an
    /// empty item list.
    pub async fn list_catalog(&self, team_id: &str) -> Result<Vec<CatalogCategory>, DatabaseError> {
        self.assert_team_exists(team_id).await?;

        let conn = self.db().connect().await?;
        let mut rows = conn.query(CATALOG_QUERY, [team_id]).await?;

        let mut catalog = Vec::new();
        while let Some(row) = rows.next().await? {
            push_row(&mut catalog, &row)?;
        }

        tracing::debug!(team_id, categories = catalog.len(), "catalog listed");
        Ok(catalog)
    }
}
