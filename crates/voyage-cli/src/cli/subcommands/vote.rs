use clap::{Args, Subcommand};

/// Vote commands. Votes are always cast as the current user.
#[derive(Clone, Debug, Subcommand)]
pub enum VoteCommands {
    /// Vote for a tech item.
    Add(VoteTargetArgs),
    /// Withdraw your vote; the item is deleted with its last vote.
    Remove(VoteTargetArgs),
    /// List the votes on a tech item.
    List(VoteListArgs),
}

#[derive(Clone, Debug, Args)]
pub struct VoteTargetArgs {
    /// Voyage team ID.
    pub team_id: String,
    /// Tech stack item ID.
    pub tech_id: String,
}

#[derive(Clone, Debug, Args)]
pub struct VoteListArgs {
    /// Tech stack item ID.
    pub tech_id: String,
}
