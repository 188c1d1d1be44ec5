use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Catalog(args) => commands::catalog::handle(&args, ctx, flags).await,
        Commands::Tech { action } => commands::tech::handle(&action, ctx, flags).await,
        Commands::Vote { action } => commands::vote::handle(&action, ctx, flags).await,
        Commands::Selection { action } => commands::selection::handle(&action, ctx, flags).await,
        Commands::Roster { action } => commands::roster::handle(&action, ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
