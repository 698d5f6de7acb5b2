//! # I/O Edge
//!
//! Everything that touches the outside world apart from the CLI itself.
//!
//! | Concern | Type | Source |
//! |---------|------|--------|
//! | Collection input | [`LineReader`] | stdin or `--input <file>` |
//! | Config | [`Config`] | `$SHKIT_CONFIG`, `.shkit.toml`, `~/.config/shkit/config.toml` |

mod config;
mod lines;

pub use config::{
    CallbackConfig, Config, ConfigError, DateConfig, OutputFormat, CONFIG_ENV, LOCAL_CONFIG_FILE,
};
pub use lines::{read_all, LineReader};
