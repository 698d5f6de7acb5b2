//! Output formatting for CLI commands
//!
//! Every write returns its `io::Result` so a closed pipe reaches `main`
//! as an error instead of a panic.

use std::io::{self, Write};

use serde::Serialize;

use crate::storage;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl From<storage::OutputFormat> for OutputFormat {
    fn from(format: storage::OutputFormat) -> Self {
        match format {
            storage::OutputFormat::Text => OutputFormat::Text,
            storage::OutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => self.write(message),
            OutputFormat::Json => self.data(&serde_json::json!({
                "success": true,
                "message": message
            })),
        }
    }

    /// Prints a sequence: one element per line, or a JSON array
    pub fn lines<S: AsRef<str> + Serialize>(&self, items: &[S]) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                let mut out = io::stdout().lock();
                for item in items {
                    writeln!(out, "{}", item.as_ref())?;
                }
                out.flush()
            }
            OutputFormat::Json => self.data(&items),
        }
    }

    /// Prints a single value: bare in text mode, `{"result": ..}` in JSON
    pub fn value<T: Serialize + std::fmt::Display>(&self, value: &T) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => self.write(value),
            OutputFormat::Json => self.data(&serde_json::json!({ "result": value })),
        }
    }

    /// Reports a boolean check
    ///
    /// Text mode stays silent; the exit status carries the answer.
    pub fn check(&self, result: bool) -> io::Result<()> {
        if self.is_json() {
            self.data(&serde_json::json!({ "result": result }))?;
        }
        Ok(())
    }

    /// Prints structured data
    pub fn data<T: Serialize + ?Sized>(&self, data: &T) -> io::Result<()> {
        let json = match self.format {
            OutputFormat::Text => serde_json::to_string_pretty(data),
            OutputFormat::Json => serde_json::to_string(data),
        }?;
        self.write(json)
    }

    /// Writes raw text to stdout without a trailing newline
    pub fn raw(&self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()
    }

    fn write(&self, line: impl std::fmt::Display) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", line)?;
        out.flush()
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Prints a verbose debug message with context (only when --verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}
