use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::roster::{
    CategoryCommands, MemberCommands, RosterCommands, TeamCommands, UserCommands,
};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct WhoamiResponse {
    team_id: String,
    user_id: String,
    member_id: Option<String>,
}

pub async fn handle(action: &RosterCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        RosterCommands::User { action } => handle_user(action, ctx, flags).await,
        RosterCommands::Team { action } => handle_team(action, ctx, flags).await,
        RosterCommands::Member { action } => handle_member(action, ctx, flags).await,
        RosterCommands::Category { action } => handle_category(action, ctx, flags).await,
    }
}

async fn handle_user(action: &UserCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        UserCommands::Create(args) => {
            let user = ctx
                .service
                .create_user(&args.first_name, &args.last_name, args.avatar.as_deref())
                .await?;
            output(&user, flags.format)
        }
        UserCommands::Get(args) => output(&ctx.service.get_user(&args.id).await?, flags.format),
    }
}

async fn handle_team(action: &TeamCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        TeamCommands::Create(args) => {
            output(&ctx.service.create_team(&args.name).await?, flags.format)
        }
    }
}

async fn handle_member(
    action: &MemberCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        MemberCommands::Add(args) => {
            let member = ctx
                .service
                .add_team_member(&args.team_id, &args.user_id)
                .await?;
            output(&member, flags.format)
        }
        MemberCommands::List(args) => {
            let user_id = match &args.user_id {
                Some(user_id) => user_id.clone(),
                None => ctx.caller()?.user_id().to_string(),
            };
            output(&ctx.service.list_memberships(&user_id).await?, flags.format)
        }
        MemberCommands::Whoami(args) => {
            let caller = ctx.caller()?;
            let member_id = ctx
                .service
                .resolve_member_identity(caller, &args.team_id)
                .await?;
            output(
                &WhoamiResponse {
                    team_id: args.team_id.clone(),
                    user_id: caller.user_id().to_string(),
                    member_id,
                },
                flags.format,
            )
        }
    }
}

async fn handle_category(
    action: &CategoryCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CategoryCommands::Create(args) => {
            let category = ctx
                .service
                .create_category(&args.name, &args.description)
                .await?;
            output(&category, flags.format)
        }
        CategoryCommands::List => output(&ctx.service.list_categories().await?, flags.format),
    }
}
