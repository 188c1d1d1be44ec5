use std::io::Read;

use serde::Serialize;
use voyage_core::errors::CoreError;
use voyage_core::requests::SelectionUpdate;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SelectionCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct UpdateResponse {
    team_id: String,
    categories: usize,
    techs: usize,
    selected: usize,
}

fn read_payload(file: &str) -> Result<String, CoreError> {
    let result = if file == "-" {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw).map(|_| raw)
    } else {
        std::fs::read_to_string(file)
    };
    result.map_err(|error| {
        CoreError::Validation(format!("cannot read selection payload '{file}': {error}"))
    })
}

fn parse_payload(raw: &str) -> Result<SelectionUpdate, CoreError> {
    serde_json::from_str(raw)
        .map_err(|error| CoreError::Validation(format!("invalid selection payload: {error}")))
}

pub async fn handle(
    action: &SelectionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SelectionCommands::Update(args) => {
            let caller = ctx.caller()?;
            let payload = parse_payload(&read_payload(&args.file)?)?;

            ctx.service
                .update_selections(&args.team_id, caller, &payload.categories)
                .await?;

            output(
                &UpdateResponse {
                    team_id: args.team_id.clone(),
                    categories: payload.categories.len(),
                    techs: payload.categories.iter().map(|c| c.techs.len()).sum(),
                    selected: payload.categories.iter().map(|c| c.selected_count()).sum(),
                },
                flags.format,
            )
        }
    }
}
