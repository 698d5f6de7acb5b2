//! Array commands

use std::io;

use anyhow::Result;
use clap::{Args, Subcommand};

use super::output::Output;
use crate::domain::{array, UtilError};
use crate::storage::read_all;

/// Elements given on the command line, or read from stdin with `--stdin`
#[derive(Args, Debug)]
pub struct ItemArgs {
    /// Elements to operate on
    #[arg(allow_hyphen_values = true)]
    pub items: Vec<String>,

    /// Read elements from stdin, one per line
    #[arg(long, conflicts_with = "items")]
    pub stdin: bool,
}

impl ItemArgs {
    fn resolve(self) -> Result<Vec<String>> {
        if self.stdin {
            read_all(io::stdin().lock())
        } else {
            Ok(self.items)
        }
    }

    /// Like `resolve`, but at least one element is mandatory
    fn require(self, op: &str) -> Result<Vec<String>> {
        let items = self.resolve()?;
        if items.is_empty() {
            return Err(UtilError::InvalidArgument(format!("{}: missing arguments", op)).into());
        }
        Ok(items)
    }
}

#[derive(Subcommand)]
pub enum ArrayCommands {
    /// Succeed if NEEDLE is one of the elements
    Contains {
        needle: String,

        #[command(flatten)]
        items: ItemArgs,
    },

    /// Drop duplicate and empty elements, keeping first occurrences
    Dedupe(ItemArgs),

    /// Succeed if there are no elements
    IsEmpty(ItemArgs),

    /// Join elements with GLUE
    Join {
        glue: String,

        #[command(flatten)]
        items: ItemArgs,
    },

    /// Reverse the elements
    Reverse(ItemArgs),

    /// Print one element chosen at random
    Random(ItemArgs),

    /// Sort elements ascending (byte order)
    Sort(ItemArgs),

    /// Sort elements descending (byte order)
    Rsort(ItemArgs),

    /// Sort integer elements numerically
    Bsort(ItemArgs),

    /// Concatenate two lists: `merge a b -- c d`
    Merge {
        /// First list, ended by `--`
        #[arg(allow_hyphen_values = true, value_terminator = "--")]
        first: Vec<String>,

        /// Second list
        #[arg(allow_hyphen_values = true)]
        second: Vec<String>,
    },
}

pub fn run(cmd: ArrayCommands, output: &Output) -> Result<()> {
    match cmd {
        ArrayCommands::Contains { needle, items } => {
            let items = items.resolve()?;
            output.verbose_ctx("contains", &format!("Searching {} elements for '{}'", items.len(), needle));
            let found = array::contains(&needle, &items);
            output.check(found)?;
            if !found {
                return Err(UtilError::PredicateFalse(format!("'{}' is not an element", needle)).into());
            }
        }

        ArrayCommands::Dedupe(items) => {
            let items = items.require("dedupe")?;
            let unique = array::dedupe(&items);
            output.verbose_ctx("dedupe", &format!("{} -> {} elements", items.len(), unique.len()));
            output.lines(&unique)?;
        }

        ArrayCommands::IsEmpty(items) => {
            let empty = array::is_empty(&items.resolve()?);
            output.check(empty)?;
            if !empty {
                return Err(UtilError::PredicateFalse("sequence is not empty".to_string()).into());
            }
        }

        ArrayCommands::Join { glue, items } => {
            let items = items.resolve()?;
            output.value(&array::join(&glue, &items))?;
        }

        ArrayCommands::Reverse(items) => {
            output.lines(&array::reverse(&items.require("reverse")?))?;
        }

        ArrayCommands::Random(items) => {
            let items = items.require("random")?;
            output.value(&array::random_element(&items)?)?;
        }

        ArrayCommands::Sort(items) => {
            output.lines(&array::sort(&items.require("sort")?))?;
        }

        ArrayCommands::Rsort(items) => {
            output.lines(&array::rsort(&items.require("rsort")?))?;
        }

        ArrayCommands::Bsort(items) => {
            output.lines(&array::bsort(&items.require("bsort")?)?)?;
        }

        ArrayCommands::Merge { first, second } => {
            if first.is_empty() && second.is_empty() {
                return Err(UtilError::InvalidArgument("merge: missing arguments".to_string()).into());
            }
            output.verbose_ctx("merge", &format!("{} + {} elements", first.len(), second.len()));
            output.lines(&array::merge(&first, &second))?;
        }
    }

    Ok(())
}
