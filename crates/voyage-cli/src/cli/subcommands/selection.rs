use clap::{Args, Subcommand};

/// Selection commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SelectionCommands {
    /// Apply a batch of `isSelected` changes atomically.
    Update(SelectionUpdateArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SelectionUpdateArgs {
    /// Voyage team ID.
    pub team_id: String,
    /// JSON payload file (`{"categories": [...]}`), or `-` for stdin.
    #[arg(long)]
    pub file: String,
}
