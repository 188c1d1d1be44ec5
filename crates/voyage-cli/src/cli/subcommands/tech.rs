use clap::{Args, Subcommand};

/// Tech stack item commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TechCommands {
    /// Propose a new tech item; your vote is cast with it.
    Propose(TechProposeArgs),
    /// Get a tech item by ID.
    Get(TechGetArgs),
    /// List a team's tech items.
    List(TechListArgs),
}

#[derive(Clone, Debug, Args)]
pub struct TechProposeArgs {
    /// Voyage team ID.
    pub team_id: String,
    /// Tech name (surrounding whitespace is trimmed).
    pub name: String,
    /// Tech category ID.
    #[arg(long)]
    pub category: String,
}

#[derive(Clone, Debug, Args)]
pub struct TechGetArgs {
    /// Tech stack item ID.
    pub tech_id: String,
}

#[derive(Clone, Debug, Args)]
pub struct TechListArgs {
    /// Voyage team ID.
    pub team_id: String,
}
