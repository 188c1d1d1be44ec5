use clap::{Args, Subcommand};

/// Roster commands for seeding users, teams, memberships, and categories.
#[derive(Clone, Debug, Subcommand)]
pub enum RosterCommands {
    /// Users.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Voyage teams.
    Team {
        #[command(subcommand)]
        action: TeamCommands,
    },
    /// Team memberships.
    Member {
        #[command(subcommand)]
        action: MemberCommands,
    },
    /// Tech categories.
    Category {
        #[command(subcommand)]
        action: CategoryCommands,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Create a user.
    Create(UserCreateArgs),
    /// Get a user by ID.
    Get(IdArgs),
}

#[derive(Clone, Debug, Args)]
pub struct UserCreateArgs {
    pub first_name: String,
    pub last_name: String,
    /// Avatar URL.
    #[arg(long)]
    pub avatar: Option<String>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum TeamCommands {
    /// Create a voyage team.
    Create(NameArgs),
}

#[derive(Clone, Debug, Subcommand)]
pub enum MemberCommands {
    /// Add a user to a team.
    Add(MemberAddArgs),
    /// List a user's memberships (defaults to the current user).
    List(MemberListArgs),
    /// Show the current user's membership ID in a team.
    Whoami(MemberWhoamiArgs),
}

#[derive(Clone, Debug, Args)]
pub struct MemberAddArgs {
    pub team_id: String,
    pub user_id: String,
}

#[derive(Clone, Debug, Args)]
pub struct MemberListArgs {
    /// User ID; the current user when omitted.
    pub user_id: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct MemberWhoamiArgs {
    pub team_id: String,
}

#[derive(Clone, Debug, Subcommand)]
pub enum CategoryCommands {
    /// Create a tech category.
    Create(CategoryCreateArgs),
    /// List all tech categories.
    List,
}

#[derive(Clone, Debug, Args)]
pub struct CategoryCreateArgs {
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
}

#[derive(Clone, Debug, Args)]
pub struct NameArgs {
    pub name: String,
}

#[derive(Clone, Debug, Args)]
pub struct IdArgs {
    pub id: String,
}
