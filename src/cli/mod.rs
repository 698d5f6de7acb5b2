//! # Command-Line Interface
//!
//! Exposes every helper to shell scripts.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Array | List manipulation | `array sort b a`, `array join , a b` |
//! | Collection | Callbacks over stdin lines | `collection filter -e '[ "$1" -gt 2 ]'` |
//! | Date | Timestamp arithmetic | `date add days 1 --to 1594147080` |
//! | Config | Configuration | `config show`, `config init` |
//!
//! ## Exit Status
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | success (or check passed) |
//! | 1 | operation failed, check false, nothing found |
//! | 2 | invalid usage |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - one element per line
//! - `json` - a JSON array, or `{"result": ...}` for single values
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod array_cmd;
mod callback;
mod collection_cmd;
mod config_cmd;
mod date_cmd;
mod output;

pub use app::{run, Cli, Commands};
pub use callback::{Callback, CallbackError};
pub use output::{Output, OutputFormat};
