use serde::Serialize;
use voyage_core::responses::RemoveVoteOutcome;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::VoteCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct RemoveResponse {
    tech_id: String,
    outcome: RemoveVoteOutcome,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct ListResponse<T> {
    tech_id: String,
    count: usize,
    votes: Vec<T>,
}

pub async fn handle(action: &VoteCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        VoteCommands::Add(args) => {
            let caller = ctx.caller()?;
            let vote = ctx.service.add_vote(&args.team_id, &args.tech_id, caller).await?;
            output(&vote, flags.format)
        }
        VoteCommands::Remove(args) => {
            let caller = ctx.caller()?;
            let outcome = ctx
                .service
                .remove_vote(&args.team_id, &args.tech_id, caller)
                .await?;
            output(
                &RemoveResponse {
                    tech_id: args.tech_id.clone(),
                    outcome,
                    message: outcome.message(),
                },
                flags.format,
            )
        }
        VoteCommands::List(args) => {
            let votes = ctx.service.list_votes(&args.tech_id).await?;
            output(
                &ListResponse {
                    tech_id: args.tech_id.clone(),
                    count: votes.len(),
                    votes,
                },
                flags.format,
            )
        }
    }
}
