use crate::cli::GlobalFlags;
use crate::cli::subcommands::TechCommands;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(action: &TechCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        TechCommands::Propose(args) => {
            let caller = ctx.caller()?;
            let result = ctx
                .service
                .propose_tech(&args.team_id, caller, &args.name, &args.category)
                .await?;
            output(&result, flags.format)
        }
        TechCommands::Get(args) => {
            let item = ctx.service.get_tech_item(&args.tech_id).await?;
            output(&item, flags.format)
        }
        TechCommands::List(args) => {
            ctx.service.assert_team_exists(&args.team_id).await?;
            let items = ctx.service.list_team_items(&args.team_id).await?;
            output(&items, flags.format)
        }
    }
}
