use clap::{Args, Subcommand, ValueEnum};

use crate::cli::subcommands::{RosterCommands, SelectionCommands, TechCommands, VoteCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Show every tech category with the team's items and voters.
    Catalog(CatalogArgs),
    /// Tech stack items.
    Tech {
        #[command(subcommand)]
        action: TechCommands,
    },
    /// Votes on tech stack items.
    Vote {
        #[command(subcommand)]
        action: VoteCommands,
    },
    /// Final tech stack selections.
    Selection {
        #[command(subcommand)]
        action: SelectionCommands,
    },
    /// Users, teams, memberships, and categories.
    Roster {
        #[command(subcommand)]
        action: RosterCommands,
    },
    /// Print the JSON Schema of a payload or response.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct CatalogArgs {
    /// Voyage team ID.
    pub team_id: String,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Which document to describe.
    #[arg(value_enum)]
    pub kind: SchemaKind,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaKind {
    /// Request body of `selection update`.
    Selection,
    /// Output of `catalog`.
    Catalog,
    /// Output of `tech propose`.
    Proposal,
}
