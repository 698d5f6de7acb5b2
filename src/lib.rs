//! shkit - helpers for shell scripts
//!
//! Three independent groups of stateless functions:
//! - [`domain::array`]: contains, dedupe, join, reverse, sort variants, merge
//! - [`domain::collection`]: each/every/filter/find/invoke/map/reject/some
//!   over a sequence of lines with a caller-supplied callback
//! - [`domain::date`]: Unix timestamp arithmetic and formatting
//!
//! The `shkit` binary exposes all of them on the command line.

pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{DateUnit, ErrorKind, Tz, UtilError};
