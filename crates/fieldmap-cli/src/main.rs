//! Fieldmap CLI - turn a flat JSON record into an XML request
//!
//! This is the main entry point for the `fieldmap` binary, providing
//! commands for mapping, validating and previewing input records against a
//! declarative mapping specification.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;
#[cfg(test)]
mod test_support;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    let cli = Cli::parse_args();

    control::set_override(cli.use_color());

    let result = load_config(&cli).and_then(|config| {
        if let Err(e) = init_logging(&cli, &config) {
            eprintln!("Failed to initialize logging: {}", e);
        }
        run(cli, config)
    });

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = Config::load_with_file(cli.config.as_deref())?;
    if !config.output.color {
        control::set_override(false);
    }
    Ok(config)
}

/// Main application logic
#[instrument(skip_all, fields(request_id = logging::current_request_id()))]
fn run(cli: Cli, config: Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let use_color = cli.use_color() && config.output.color;
    let mut output = OutputWriter::new(cli.output, use_color, cli.quiet, cli.verbosity_level());

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Map(args) => handlers::handle_map(args, &config, &mut output),
        Commands::Validate(args) => handlers::handle_validate(args, &config, &mut output),
        Commands::Preview(args) => handlers::handle_preview(args, &config, &mut output),
        Commands::Config(args) => handlers::handle_config(args, &config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let verbosity = cli.verbosity_level();
    let mut logging_config = LoggingConfig::from_verbosity(verbosity);
    logging_config.merge_with_file(&config.logging, verbosity);
    logging_config.merge_with_env();

    // Quiet mode only reports errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["fieldmap", "-vv", "map", "input.json"]);
        assert_eq!(cli.verbosity_level(), 2);
        assert!(matches!(cli.command, Commands::Map(_)));

        let cli = Cli::parse_from(["fieldmap", "--quiet", "config", "show"]);
        assert_eq!(cli.verbosity_level(), 0);
        assert!(matches!(cli.command, Commands::Config(_)));
    }

    #[test]
    fn test_load_config_from_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        std::fs::write(&path, "mapping_file: acme.yaml\n").unwrap();

        let cli = Cli::parse_from([
            "fieldmap",
            "--config",
            path.to_str().unwrap(),
            "validate",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.mapping_file, Some(std::path::PathBuf::from("acme.yaml")));
    }

    #[test]
    fn test_missing_config_flag_is_an_error() {
        let cli = Cli::parse_from(["fieldmap", "--config", "/no/such/fieldmap.yaml", "validate"]);
        assert_eq!(load_config(&cli).unwrap_err().exit_code(), 4);
    }
}
