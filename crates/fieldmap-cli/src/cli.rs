//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Fieldmap CLI - turn a flat JSON record into an XML request
///
/// Validates an input record against a declarative mapping, normalizes and
/// computes values, and renders them as a nested XML document.
#[derive(Parser, Debug)]
#[command(
    name = "fieldmap",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "FIELDMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for reports
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the XML request for an input record
    Map(MapArgs),

    /// Check an input record against the mapping without rendering
    Validate(ValidateArgs),

    /// Show the mapped values and nested tree for an input record
    Preview(PreviewArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Input and mapping locations shared by the mapping commands
#[derive(Parser, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to the JSON input record (falls back to `default_input` from config)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Path to the mapping specification (falls back to `mapping_file` from config)
    #[arg(short, long, value_name = "FILE")]
    pub mapping: Option<PathBuf>,
}

/// Arguments for the map command
#[derive(Parser, Debug)]
pub struct MapArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Write the XML to a file instead of stdout
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,

    /// Emit compact XML without indentation
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the preview command
#[derive(Parser, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Show only the flat mapped values
    #[arg(long, conflicts_with = "structure_only")]
    pub values_only: bool,

    /// Show only the nested tree
    #[arg(long)]
    pub structure_only: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init(ConfigInitArgs),

    /// Show the effective configuration
    Show(ConfigShowArgs),
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file (defaults to ./.fieldmap.yaml)
    #[arg(long, value_name = "FILE")]
    pub path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_map_arguments() {
        let cli = Cli::parse_from([
            "fieldmap",
            "map",
            "customer.json",
            "--mapping",
            "mapping.yaml",
            "--save-to",
            "out.xml",
            "--compact",
        ]);
        match cli.command {
            Commands::Map(args) => {
                assert_eq!(args.source.input, Some(PathBuf::from("customer.json")));
                assert_eq!(args.source.mapping, Some(PathBuf::from("mapping.yaml")));
                assert_eq!(args.save_to, Some(PathBuf::from("out.xml")));
                assert!(args.compact);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_input_is_optional() {
        let cli = Cli::parse_from(["fieldmap", "validate"]);
        match cli.command {
            Commands::Validate(args) => {
                assert!(args.source.input.is_none());
                assert!(args.source.mapping.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli::parse_from(["fieldmap", "-vv", "validate", "in.json"]);
        assert_eq!(cli.verbosity_level(), 2);

        let quiet = Cli::parse_from(["fieldmap", "--quiet", "validate", "in.json"]);
        assert_eq!(quiet.verbosity_level(), 0);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["fieldmap", "-q", "-v", "validate"]).is_err());
    }

    #[test]
    fn test_preview_flags_conflict() {
        assert!(Cli::try_parse_from([
            "fieldmap",
            "preview",
            "--values-only",
            "--structure-only"
        ])
        .is_err());
    }
}
