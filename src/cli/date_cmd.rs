//! Date commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::domain::{date, DateUnit, Tz};
use crate::storage::Config;

#[derive(Subcommand)]
pub enum DateCommands {
    /// Print the current Unix timestamp
    Now,

    /// Convert a datetime string to a Unix timestamp
    Epoch {
        /// Datetime, e.g. "2020-07-07 18:38" or "@1594147080"
        #[arg(required = true, num_args = 1..)]
        datetime: Vec<String>,

        /// Read zone-less input as local time
        #[arg(long)]
        local: bool,
    },

    /// Add N units to a timestamp (default: now)
    Add {
        /// seconds, minutes, hours, days, weeks, months or years
        unit: DateUnit,

        #[arg(allow_hyphen_values = true)]
        n: i64,

        /// Timestamp to start from
        #[arg(long, allow_hyphen_values = true)]
        to: Option<i64>,
    },

    /// Subtract N units from a timestamp (default: now)
    Sub {
        /// seconds, minutes, hours, days, weeks, months or years
        unit: DateUnit,

        #[arg(allow_hyphen_values = true)]
        n: i64,

        /// Timestamp to start from
        #[arg(long, allow_hyphen_values = true)]
        from: Option<i64>,
    },

    /// Render a timestamp (default: now) as a calendar string
    Format {
        #[arg(allow_hyphen_values = true)]
        timestamp: Option<i64>,

        /// strftime pattern (default from config, "%F %T")
        #[arg(long, short = 'p')]
        pattern: Option<String>,

        /// Render in local time instead of the configured zone
        #[arg(long)]
        local: bool,
    },
}

fn zone(local: bool, config: &Config) -> Tz {
    if local {
        Tz::Local
    } else {
        config.date.timezone
    }
}

pub fn run(cmd: DateCommands, output: &Output, config: &Config) -> Result<()> {
    match cmd {
        DateCommands::Now => output.value(&date::now())?,

        DateCommands::Epoch { datetime, local } => {
            let input = datetime.join(" ");
            let tz = zone(local, config);
            output.verbose_ctx("epoch", &format!("Parsing '{}' ({:?})", input, tz));
            output.value(&date::epoch_in(&input, tz)?)?;
        }

        DateCommands::Add { unit, n, to } => {
            let ts = match to {
                Some(ts) => date::add_to(ts, unit, n)?,
                None => date::add_to_now(unit, n)?,
            };
            output.verbose_ctx("add", &format!("{:?} + {} {} = {}", to, n, unit, ts));
            output.value(&ts)?;
        }

        DateCommands::Sub { unit, n, from } => {
            let ts = match from {
                Some(ts) => date::sub_from(ts, unit, n)?,
                None => date::sub_from_now(unit, n)?,
            };
            output.verbose_ctx("sub", &format!("{:?} - {} {} = {}", from, n, unit, ts));
            output.value(&ts)?;
        }

        DateCommands::Format {
            timestamp,
            pattern,
            local,
        } => {
            let ts = timestamp.unwrap_or_else(date::now);
            let pattern = pattern.as_deref().unwrap_or(&config.date.format);
            output.value(&date::format_in(ts, pattern, zone(local, config))?)?;
        }
    }

    Ok(())
}
