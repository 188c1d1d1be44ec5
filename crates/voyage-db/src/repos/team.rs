//! Team validator.

use crate::error::DatabaseError;
use crate::service::TechStackService;

pub(crate) async fn team_exists(
    conn: &libsql::Connection,
    team_id: &str,
) -> Result<bool, DatabaseError> {
    let mut rows = conn
        .query("SELECT 1 FROM voyage_teams WHERE id = ?1", [team_id])
        .await?;
    Ok(rows.next().await?.is_some())
}

impl TechStackService {
    /// Confirm `team_id` refers to an existing team.
    ///
    /// Guards reads. Writes skip it: a resolved membership already proves the
    /// team exists.
    pub async fn assert_team_exists(&self, team_id: &str) -> Result<(), DatabaseError> {
        let conn = self.db().connect().await?;
        if team_exists(&conn, team_id).await? {
            Ok(())
        } else {
            Err(DatabaseError::NotFound {
                entity: "Voyage team",
                key: team_id.to_string(),
            })
        }
    }
}
