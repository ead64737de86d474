use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `ama` binary.
#[derive(Debug, Parser)]
#[command(name = "ama", version, about = "ama - civic reporting and public accountability")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database path (overrides `database.path`)
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// User ID recorded as the actor in the audit trail
    #[arg(long, global = true)]
    pub actor: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            database: self.database.clone(),
            actor: self.actor.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::{ActionCommands, FlagCommands, ScorecardCommands};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "ama", "--format", "table", "--limit", "10", "--verbose", "stats", "usr-1a2b3c4d",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Stats(ref args) if args.user == "usr-1a2b3c4d"));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["ama", "level", "list", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["ama", "--format", "xml", "level", "list"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from([
            "ama",
            "--database",
            "/tmp/ama.db",
            "--actor",
            "usr-0000aaaa",
            "init",
        ])
        .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.database.as_deref(), Some("/tmp/ama.db"));
        assert_eq!(flags.actor.as_deref(), Some("usr-0000aaaa"));
    }

    #[test]
    fn action_report_collects_location() {
        let cli = Cli::try_parse_from([
            "ama",
            "action",
            "report",
            "--user",
            "usr-1a2b3c4d",
            "--category",
            "water",
            "--title",
            "Burst main on Ngong Road",
            "--lat",
            "-1.3",
            "--lng",
            "36.78",
            "--private",
        ])
        .expect("cli should parse");

        match cli.command {
            Commands::Action {
                action:
                    ActionCommands::Report {
                        category,
                        lat,
                        lng,
                        private,
                        ..
                    },
            } => {
                assert_eq!(category, "water");
                assert_eq!(lat, Some(-1.3));
                assert_eq!(lng, Some(36.78));
                assert!(private);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn flag_and_scorecard_subcommands() {
        let cli = Cli::try_parse_from(["ama", "flag", "check", "civic_router"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Flag { action: FlagCommands::Check { ref key } } if key == "civic_router"
        ));

        let cli = Cli::try_parse_from(["ama", "scorecard", "refresh", "usr-0fficia1"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Scorecard { action: ScorecardCommands::Refresh { .. } }
        ));
    }

    #[test]
    fn route_accepts_repeated_photos() {
        let cli = Cli::try_parse_from([
            "ama",
            "route",
            "Streetlights out on Moi Avenue",
            "--photo",
            "https://img.example.org/a.jpg",
            "--photo",
            "https://img.example.org/b.jpg",
            "--county",
            "Mombasa",
        ])
        .expect("cli should parse");
        match cli.command {
            Commands::Route(args) => {
                assert_eq!(args.photos.len(), 2);
                assert_eq!(args.county.as_deref(), Some("Mombasa"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
