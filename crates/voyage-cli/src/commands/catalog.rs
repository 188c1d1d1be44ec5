use serde::Serialize;
use voyage_core::responses::CatalogCategory;

use crate::cli::root_commands::CatalogArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

/// One line of the table view: a category with one of its items, or an empty category.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct CatalogRow {
    category: String,
    tech: String,
    tech_id: String,
    selected: bool,
    votes: usize,
    voters: String,
}

fn flatten(catalog: &[CatalogCategory]) -> Vec<CatalogRow> {
    let mut rows = Vec::new();
    for category in catalog {
        if category.items.is_empty() {
            rows.push(CatalogRow {
                category: category.name.clone(),
                tech: String::from("-"),
                tech_id: String::from("-"),
                selected: false,
                votes: 0,
                voters: String::new(),
            });
        }
        for item in &category.items {
            rows.push(CatalogRow {
                category: category.name.clone(),
                tech: item.name.clone(),
                tech_id: item.id.clone(),
                selected: item.is_selected,
                votes: item.voters.len(),
                voters: item
                    .voters
                    .iter()
                    .map(|voter| format!("{} {}", voter.first_name, voter.last_name))
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
    }
    rows
}

pub async fn handle(args: &CatalogArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let catalog = ctx.service.list_catalog(&args.team_id).await?;
    if flags.format == OutputFormat::Table {
        return output(&flatten(&catalog), flags.format);
    }
    output(&catalog, flags.format)
}
