//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::array_cmd::{self, ArrayCommands};
use super::collection_cmd::{self, CollectionCommands};
use super::config_cmd::{self, ConfigCommands};
use super::date_cmd::{self, DateCommands};
use super::output::{Output, OutputFormat};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "shkit")]
#[command(author, version, about = "Array, collection and date helpers for shell scripts")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (default from config, else text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Operate on a list of elements
    #[command(subcommand)]
    Array(ArrayCommands),

    /// Apply a callback to lines read from stdin
    #[command(subcommand)]
    Collection(CollectionCommands),

    /// Timestamp arithmetic and formatting
    #[command(subcommand)]
    Date(DateCommands),

    /// Inspect or create the config file
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.command)?;

    let format = cli
        .format
        .unwrap_or_else(|| OutputFormat::from(config.default_format));
    let output = Output::new(format, cli.verbose);

    match &config.source {
        Some(path) => output.verbose(&format!("Loaded config from {}", path.display())),
        None => output.verbose("Using default config"),
    }

    match cli.command {
        Commands::Array(cmd) => array_cmd::run(cmd, &output)?,
        Commands::Collection(cmd) => collection_cmd::run(cmd, &output, &config)?,
        Commands::Date(cmd) => date_cmd::run(cmd, &output, &config)?,
        Commands::Config(cmd) => config_cmd::run(cmd, &output, &config)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// `config init` must work even when the existing config is broken
fn load_config(command: &Commands) -> Result<Config> {
    match command {
        Commands::Config(ConfigCommands::Init { .. }) => Ok(Config::default()),
        _ => Config::load(),
    }
}
