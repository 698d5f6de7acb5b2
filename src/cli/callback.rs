//! External callbacks for collection commands
//!
//! A callback is bound in one of two ways:
//!
//! - **Command**: `-- <program> [args..]`. The element is appended as the last
//!   positional argument, so `-- test -n` runs `test -n <element>`.
//! - **Expression**: `--expr '<shell code>'`. The code runs as
//!   `<shell> -c <code> shkit <element>`, so it sees the element as `$1` and
//!   in the environment variable named by `callback.var` (default `$it`).
//!
//! A predicate holds when the process exits with status 0. A transform's
//! result is its stdout minus one trailing newline.

use std::io;
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

use crate::domain::UtilError;
use crate::storage::CallbackConfig;

/// `$0` seen by expression callbacks
const EXPR_ARG0: &str = "shkit";

#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{program}' exited with {status}")]
    Exit { program: String, status: ExitStatus },

    #[error("output of '{program}' is not valid UTF-8")]
    Utf8 { program: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    Command { program: String, args: Vec<String> },
    Expr { shell: String, var: String, code: String },
}

impl Callback {
    /// Builds a callback from `--expr` or the trailing command
    ///
    /// Exactly one of the two must be present.
    pub fn from_args(
        expr: Option<String>,
        command: Vec<String>,
        config: &CallbackConfig,
    ) -> Result<Self, UtilError> {
        match (expr, command.split_first()) {
            (Some(_), Some(_)) => Err(UtilError::InvalidArgument(
                "pass either --expr or a command after '--', not both".to_string(),
            )),
            (Some(code), None) => Ok(Callback::Expr {
                shell: config.shell.clone(),
                var: config.var.clone(),
                code,
            }),
            (None, Some((program, args))) => Ok(Callback::Command {
                program: program.clone(),
                args: args.to_vec(),
            }),
            (None, None) => Err(UtilError::InvalidArgument(
                "missing callback: pass --expr '<code>' or '-- <program> [args..]'".to_string(),
            )),
        }
    }

    /// Short name used in error messages
    pub fn label(&self) -> String {
        match self {
            Callback::Command { program, .. } => program.clone(),
            Callback::Expr { code, .. } => format!("expr `{}`", code),
        }
    }

    /// Builds the process for one call, with `elements` bound as arguments
    fn command(&self, elements: &[&str]) -> Command {
        match self {
            Callback::Command { program, args } => {
                let mut cmd = Command::new(program);
                cmd.args(args).args(elements);
                cmd
            }
            Callback::Expr { shell, var, code } => {
                let mut cmd = Command::new(shell);
                cmd.arg("-c").arg(code).arg(EXPR_ARG0).args(elements);
                cmd.env(var, elements.join("\n"));
                cmd
            }
        }
    }

    fn spawn_error(&self, source: io::Error) -> CallbackError {
        CallbackError::Spawn {
            program: self.label(),
            source,
        }
    }

    fn exit_error(&self, status: ExitStatus) -> CallbackError {
        CallbackError::Exit {
            program: self.label(),
            status,
        }
    }

    /// Evaluates the callback as a predicate on `item`
    ///
    /// A non-zero exit is a clean `false`; only a failure to run is an error.
    pub fn test(&self, item: &str) -> Result<bool, CallbackError> {
        let status = self
            .command(&[item])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .map_err(|e| self.spawn_error(e))?;
        Ok(status.success())
    }

    /// Runs the callback on `item` and returns its stdout
    pub fn transform(&self, item: &str) -> Result<String, CallbackError> {
        let output = self
            .command(&[item])
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(self.exit_error(output.status));
        }

        let mut stdout = String::from_utf8(output.stdout).map_err(|_| CallbackError::Utf8 {
            program: self.label(),
        })?;
        if stdout.ends_with('\n') {
            stdout.pop();
        }
        Ok(stdout)
    }

    /// Runs the callback on `item`, passing its output straight through
    pub fn run(&self, item: &str) -> Result<(), CallbackError> {
        self.run_with(&[item])
    }

    /// Runs the callback once with every element as an argument
    pub fn invoke<S: AsRef<str>>(&self, items: &[S]) -> Result<(), CallbackError> {
        let elements: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
        self.run_with(&elements)
    }

    fn run_with(&self, elements: &[&str]) -> Result<(), CallbackError> {
        let status = self
            .command(elements)
            .stdin(Stdio::null())
            .status()
            .map_err(|e| self.spawn_error(e))?;

        if status.success() {
            Ok(())
        } else {
            Err(self.exit_error(status))
        }
    }
}
