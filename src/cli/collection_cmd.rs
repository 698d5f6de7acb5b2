//! Collection commands
//!
//! Each command reads lines lazily from stdin (or `--input`), so `every`,
//! `some` and `find` stop reading as soon as their answer is known.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use super::callback::Callback;
use super::output::Output;
use crate::domain::{collection, UtilError};
use crate::storage::{Config, LineReader};

#[derive(Args, Debug)]
pub struct CallbackArgs {
    /// Shell code run per element; the element is `$1` and `$it`
    #[arg(long, short = 'e')]
    pub expr: Option<String>,

    /// Read lines from FILE instead of stdin
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Program and leading arguments; the element is appended (after `--`)
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

#[derive(Subcommand)]
pub enum CollectionCommands {
    /// Run the callback on every line, stopping at the first failure
    Each(CallbackArgs),

    /// Succeed if the predicate holds for every line
    Every(CallbackArgs),

    /// Print lines for which the predicate holds
    Filter(CallbackArgs),

    /// Print the first line for which the predicate holds
    Find(CallbackArgs),

    /// Run the callback once with all lines as arguments
    Invoke(CallbackArgs),

    /// Print the callback's output for every line
    Map(CallbackArgs),

    /// Print lines for which the predicate does not hold
    Reject(CallbackArgs),

    /// Succeed if the predicate holds for at least one line
    Some(CallbackArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Each,
    Every,
    Filter,
    Find,
    Invoke,
    Map,
    Reject,
    Some,
}

impl Op {
    fn name(self) -> &'static str {
        match self {
            Op::Each => "each",
            Op::Every => "every",
            Op::Filter => "filter",
            Op::Find => "find",
            Op::Invoke => "invoke",
            Op::Map => "map",
            Op::Reject => "reject",
            Op::Some => "some",
        }
    }
}

impl CollectionCommands {
    fn into_parts(self) -> (Op, CallbackArgs) {
        match self {
            CollectionCommands::Each(args) => (Op::Each, args),
            CollectionCommands::Every(args) => (Op::Every, args),
            CollectionCommands::Filter(args) => (Op::Filter, args),
            CollectionCommands::Find(args) => (Op::Find, args),
            CollectionCommands::Invoke(args) => (Op::Invoke, args),
            CollectionCommands::Map(args) => (Op::Map, args),
            CollectionCommands::Reject(args) => (Op::Reject, args),
            CollectionCommands::Some(args) => (Op::Some, args),
        }
    }
}

/// Result of a collection command, held back until the input is known good
enum Outcome {
    Done,
    Check { result: bool, failure: &'static str },
    Value(String),
    Lines(Vec<String>),
}

pub fn run(cmd: CollectionCommands, output: &Output, config: &Config) -> Result<()> {
    let (op, args) = cmd.into_parts();
    let ctx = op.name();

    let callback = Callback::from_args(args.expr, args.command, &config.callback)?;
    output.verbose_ctx(ctx, &format!("Callback: {}", callback.label()));

    if let Some(path) = &args.input {
        output.verbose_ctx(ctx, &format!("Reading lines from {}", path.display()));
    }
    let mut lines = LineReader::open(args.input.as_deref())?;

    let outcome = apply(op, &callback, &mut lines, output);
    output.verbose_ctx(ctx, &format!("Read {} lines", lines.lines_read()));

    // Nothing is printed for a partial read
    lines.finish()?;

    match outcome? {
        Outcome::Done => {}
        Outcome::Check { result, failure } => {
            output.check(result)?;
            if !result {
                return Err(UtilError::PredicateFalse(failure.to_string()).into());
            }
        }
        Outcome::Value(value) => output.value(&value)?,
        Outcome::Lines(lines) => output.lines(&lines)?,
    }

    Ok(())
}

fn apply<I>(op: Op, callback: &Callback, lines: I, output: &Output) -> Result<Outcome>
where
    I: Iterator<Item = String>,
{
    let outcome = match op {
        Op::Each => {
            let visited = collection::each(lines, |item| callback.run(item))?;
            output.verbose_ctx(op.name(), &format!("Ran callback on {} lines", visited));
            Outcome::Done
        }
        Op::Every => Outcome::Check {
            result: collection::every(lines, |item| callback.test(item))?,
            failure: "a line failed the predicate",
        },
        Op::Some => Outcome::Check {
            result: collection::some(lines, |item| callback.test(item))?,
            failure: "no line passed the predicate",
        },
        Op::Find => Outcome::Value(collection::find(lines, |item| callback.test(item))?),
        Op::Filter => Outcome::Lines(collection::filter(lines, |item| callback.test(item))?),
        Op::Reject => Outcome::Lines(collection::reject(lines, |item| callback.test(item))?),
        Op::Map => Outcome::Lines(collection::map(lines, |item| callback.transform(item))?),
        Op::Invoke => {
            collection::invoke(lines, |all| callback.invoke(&all))?;
            Outcome::Done
        }
    };

    Ok(outcome)
}
