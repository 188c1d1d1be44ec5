use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod report;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        let code = report::report(&error);
        std::process::exit(code);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();

    let config = bootstrap::load_config(&flags)?;
    init_tracing(&config.general.log_filter, flags.quiet, flags.verbose)?;
    ui::init(&flags);

    if let cli::Commands::Schema(args) = &cli.command {
        return commands::schema::handle(args, &flags);
    }

    context::warn_unconfigured();

    let ctx = context::AppContext::init(&config, &flags)
        .await
        .context("failed to initialize voyage application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

/// Install the stderr log subscriber.
///
/// `VOYAGE_LOG` wins; otherwise `--quiet`/`--verbose`, then the configured
/// `general.log_filter`, then `warn`.
fn init_tracing(config_filter: &str, quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else if !config_filter.trim().is_empty() {
        config_filter.trim()
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("VOYAGE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
