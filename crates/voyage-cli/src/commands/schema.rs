use voyage_core::requests::SelectionUpdate;
use voyage_core::responses::{CatalogCategory, ProposalResult};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaKind};
use crate::output::output;

fn schema_for(kind: SchemaKind) -> schemars::Schema {
    match kind {
        SchemaKind::Selection => schemars::schema_for!(SelectionUpdate),
        SchemaKind::Catalog => schemars::schema_for!(Vec<CatalogCategory>),
        SchemaKind::Proposal => schemars::schema_for!(ProposalResult),
    }
}

/// Handle `voyage schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema_for(args.kind), flags.format)
}
