//! Identity resolver: caller + team → team membership.

use voyage_core::identity::AuthenticatedCaller;

use crate::error::DatabaseError;
use crate::service::TechStackService;

/// Look up the membership of `user_id` in `team_id` on an existing connection.
pub(crate) async fn member_id_for(
    conn: &libsql::Connection,
    user_id: &str,
    team_id: &str,
) -> Result<Option<String>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT id FROM voyage_team_members WHERE user_id = ?1 AND voyage_team_id = ?2",
            [user_id, team_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row.get::<String>(0)?)),
        None => Ok(None),
    }
}

impl TechStackService {
    /// Resolve the caller's membership identifier in `team_id`, if any.
    ///
    /// Side-effect free.
    pub async fn resolve_member_identity(
        &self,
        caller: &AuthenticatedCaller,
        team_id: &str,
    ) -> Result<Option<String>, DatabaseError> {
        let conn = self.db().connect().await?;
        member_id_for(&conn, caller.user_id(), team_id).await
    }

    /// Resolve the caller's membership or fail with `BadRequest`.
    ///
    /// This is the authorization gate in front of every mutation.
    pub async fn require_member(
        &self,
        caller: &AuthenticatedCaller,
        team_id: &str,
    ) -> Result<String, DatabaseError> {
        if let Some(member_id) = self.resolve_member_identity(caller, team_id).await? {
            return Ok(member_id);
        }
        tracing::warn!(user_id = caller.user_id(), team_id, "caller is not a team member");
        Err(DatabaseError::invalid_member(caller.user_id(), team_id))
    }
}
