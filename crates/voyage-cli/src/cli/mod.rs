use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `voyage` binary.
#[derive(Debug, Parser)]
#[command(
    name = "voyage",
    version,
    about = "Voyage - propose, vote on, and select a team tech stack"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Table colors: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Act as this user ID (defaults to general.default_user)
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Database file path (overrides database.path)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Quiet mode (errors only in logs)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            color: self.color,
            user: self.user.clone(),
            db: self.db.clone(),
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::{SelectionCommands, TechCommands, VoteCommands};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "voyage",
            "--format",
            "table",
            "--user",
            "usr-0000000a",
            "--verbose",
            "catalog",
            "vtm-00000001",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.user.as_deref(), Some("usr-0000000a"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Catalog(ref args) if args.team_id == "vtm-00000001"));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["voyage", "catalog", "vtm-1", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["voyage", "--format", "xml", "catalog", "vtm-1"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn tech_propose_requires_category() {
        let parsed = Cli::try_parse_from(["voyage", "tech", "propose", "vtm-1", "Svelte"]);
        assert!(parsed.is_err());

        let cli = Cli::try_parse_from([
            "voyage", "tech", "propose", "vtm-1", "Svelte", "--category", "cat-1",
        ])
        .expect("cli should parse");
        match cli.command {
            Commands::Tech {
                action: TechCommands::Propose(args),
            } => {
                assert_eq!(args.name, "Svelte");
                assert_eq!(args.category, "cat-1");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn vote_subcommands_parse() {
        let cli = Cli::try_parse_from(["voyage", "vote", "remove", "vtm-1", "tch-1"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Vote {
                action: VoteCommands::Remove(_)
            }
        ));
    }

    #[test]
    fn selection_update_reads_stdin_marker() {
        let cli = Cli::try_parse_from(["voyage", "selection", "update", "vtm-1", "--file", "-"])
            .expect("cli should parse");
        match cli.command {
            Commands::Selection {
                action: SelectionCommands::Update(args),
            } => assert_eq!(args.file, "-"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["voyage", "--db", "/tmp/demo.db", "catalog", "vtm-1"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.db.as_deref(), Some("/tmp/demo.db"));
        assert!(flags.user.is_none());
    }
}
