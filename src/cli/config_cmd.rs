//! Config commands

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;

use super::output::Output;
use crate::domain::UtilError;
use crate::storage::{Config, LOCAL_CONFIG_FILE};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Print the path of the config file in use
    Path,

    /// Write a default config file
    Init {
        /// Write `.shkit.toml` in the current directory instead of the global file
        #[arg(long)]
        local: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(cmd: ConfigCommands, output: &Output, config: &Config) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(output, config)?,

        ConfigCommands::Path => match &config.source {
            Some(path) => output.value(&path.display().to_string())?,
            None => {
                return Err(UtilError::NotFound("no config file in use; defaults apply".to_string()).into())
            }
        },

        ConfigCommands::Init { local, force } => {
            let path = if local {
                std::env::current_dir()
                    .context("Failed to read current directory")?
                    .join(LOCAL_CONFIG_FILE)
            } else {
                Config::global_config_dir()
                    .map(|dir| dir.join("config.toml"))
                    .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            };
            init(output, &path, force)?
        }
    }

    Ok(())
}

fn show(output: &Output, config: &Config) -> Result<()> {
    if output.is_json() {
        output.data(&serde_json::json!({
            "source": config.source.as_ref().map(|p| p.display().to_string()),
            "config": config,
        }))?;
    } else {
        let header = match &config.source {
            Some(path) => format!("# {}\n", path.display()),
            None => "# defaults\n".to_string(),
        };
        let body = toml::to_string_pretty(config).context("Failed to serialize config")?;
        output.raw(&(header + &body))?;
    }
    Ok(())
}

fn init(output: &Output, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save(path)?;
    output.success(&format!("Wrote default config to {}", path.display()))?;
    Ok(())
}
