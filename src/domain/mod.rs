//! Helper functions for shkit
//!
//! Pure, stateless logic without any I/O concerns. Sequences go in as
//! borrowed string slices or iterators and come out as owned `Vec<String>`.

pub mod array;
pub mod collection;
pub mod date;
mod error;

pub use date::{DateUnit, Tz};
pub use error::{BoxError, ErrorKind, UtilError, EXIT_FAILURE, EXIT_USAGE};
