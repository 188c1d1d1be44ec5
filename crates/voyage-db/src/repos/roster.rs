//! Roster repository: users, teams, memberships, and tech categories.
//!
//! The voting subsystem only reads these; they are created here so the store
//! can be seeded from the CLI and from tests.

use chrono::Utc;

use voyage_core::entities::{TechCategory, User, VoyageTeam, VoyageTeamMember};
use voyage_core::ids::{PREFIX_CATEGORY, PREFIX_MEMBER, PREFIX_TEAM, PREFIX_USER};

use crate::error::DatabaseError;
use crate::helpers::{generate_id, get_opt_string, map_unique_violation, parse_datetime};
use crate::service::TechStackService;

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get::<String>(0)?,
        first_name: row.get::<String>(1)?,
        last_name: row.get::<String>(2)?,
        avatar: get_opt_string(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

fn row_to_category(row: &libsql::Row) -> Result<TechCategory, DatabaseError> {
    Ok(TechCategory {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        description: row.get::<String>(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl TechStackService {
    /// Register a user with a generated `usr-` id.
    pub async fn create_user(
        &self,
        first_name: &str,
        last_name: &str,
        avatar: Option<&str>,
    ) -> Result<User, DatabaseError> {
        let conn = self.db().connect().await?;
        let now = Utc::now();
        let id = generate_id(&conn, PREFIX_USER).await?;

        conn.execute(
            "INSERT INTO users (id, first_name, last_name, avatar, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            libsql::params![id.as_str(), first_name, last_name, avatar, now.to_rfc3339()],
        )
        .await?;

        Ok(User {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            avatar: avatar.map(String::from),
            created_at: now,
        })
    }

    /// Fetch a user by id, or `NotFound`.
    pub async fn get_user(&self, id: &str) -> Result<User, DatabaseError> {
        let conn = self.db().connect().await?;
        let mut rows = conn
            .query(
                "SELECT id, first_name, last_name, avatar, created_at FROM users WHERE id = ?1",
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| DatabaseError::NotFound {
            entity: "User",
            key: id.to_string(),
        })?;
        row_to_user(&row)
    }

    /// Create a voyage team; a taken name is a `Conflict`.
    pub async fn create_team(&self, name: &str) -> Result<VoyageTeam, DatabaseError> {
        let conn = self.db().connect().await?;
        let now = Utc::now();
        let id = generate_id(&conn, PREFIX_TEAM).await?;

        map_unique_violation(
            conn.execute(
                "INSERT INTO voyage_teams (id, name, created_at) VALUES (?1, ?2, ?3)",
                libsql::params![id.as_str(), name, now.to_rfc3339()],
            )
            .await,
            || format!("Voyage team '{name}' already exists"),
        )?;

        tracing::info!(team_id = %id, name, "created voyage team");
        Ok(VoyageTeam {
            id,
            name: name.to_string(),
            created_at: now,
        })
    }

    /// Add `user_id` to `team_id`. A user can hold one membership per team.
    pub async fn add_team_member(
        &self,
        team_id: &str,
        user_id: &str,
    ) -> Result<VoyageTeamMember, DatabaseError> {
        self.assert_team_exists(team_id).await?;
        self.get_user(user_id).await?;

        let conn = self.db().connect().await?;
        let now = Utc::now();
        let id = generate_id(&conn, PREFIX_MEMBER).await?;

        map_unique_violation(
            conn.execute(
                "INSERT INTO voyage_team_members (id, user_id, voyage_team_id, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![id.as_str(), user_id, team_id, now.to_rfc3339()],
            )
            .await,
            || format!("User {user_id} is already a member of team {team_id}"),
        )?;

        tracing::info!(member_id = %id, user_id, team_id, "added team member");
        Ok(VoyageTeamMember {
            id,
            user_id: user_id.to_string(),
            voyage_team_id: team_id.to_string(),
            created_at: now,
        })
    }

    /// Create a tech category; names are unique across teams.
    pub async fn create_category(
        &self,
        name: &str,
        description: &str,
    ) -> Result<TechCategory, DatabaseError> {
        let conn = self.db().connect().await?;
        let now = Utc::now();
        let id = generate_id(&conn, PREFIX_CATEGORY).await?;

        map_unique_violation(
            conn.execute(
                "INSERT INTO tech_categories (id, name, description, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![id.as_str(), name, description, now.to_rfc3339()],
            )
            .await,
            || format!("Tech category '{name}' already exists"),
        )?;

        Ok(TechCategory {
            id,
            name: name.to_string(),
            description: description.to_string(),
            created_at: now,
        })
    }

    /// All tech categories, ordered by name.
    pub async fn list_categories(&self) -> Result<Vec<TechCategory>, DatabaseError> {
        let conn = self.db().connect().await?;
        let mut rows = conn
            .query(
                "SELECT id, name, description, created_at FROM tech_categories ORDER BY name, id",
                (),
            )
            .await?;

        let mut categories = Vec::new();
        while let Some(row) = rows.next().await? {
            categories.push(row_to_category(&row)?);
        }
        Ok(categories)
    }

    /// List all teams the given user belongs to.
    pub async fn list_memberships(
        &self,
        user_id: &str,
    ) -> Result<Vec<VoyageTeamMember>, DatabaseError> {
        let conn = self.db().connect().await?;
        let mut rows = conn
            .query(
                "SELECT id, user_id, voyage_team_id, created_at FROM voyage_team_members
                 WHERE user_id = ?1 ORDER BY created_at",
                [user_id],
            )
            .await?;

        let mut members = Vec::new();
        while let Some(row) = rows.next().await? {
            members.push(VoyageTeamMember {
                id: row.get::<String>(0)?,
                user_id: row.get::<String>(1)?,
                voyage_team_id: row.get::<String>(2)?,
                created_at: parse_datetime(&row.get::<String>(3)?)?,
            });
        }
        Ok(members)
    }
}

/// Whether a tech category exists, on an existing connection.
pub(crate) async fn category_exists(
    conn: &libsql::Connection,
    category_id: &str,
) -> Result<bool, DatabaseError> {
    let mut rows = conn
        .query("SELECT 1 FROM tech_categories WHERE id = ?1", [category_id])
        .await?;
    Ok(rows.next().await?.is_some())
}
