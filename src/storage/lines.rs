//! Line-delimited input
//!
//! [`LineReader`] yields lines lazily so short-circuiting operations stop
//! reading once their answer is known. An I/O error ends the iteration and
//! is held until [`LineReader::finish`] is called.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

pub struct LineReader<R> {
    reader: R,
    error: Option<io::Error>,
    read: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            error: None,
            read: 0,
        }
    }

    /// Number of lines yielded so far
    pub fn lines_read(&self) -> usize {
        self.read
    }

    /// Surfaces an I/O error that ended iteration early
    pub fn finish(self) -> Result<usize> {
        match self.error {
            Some(e) => Err(anyhow::Error::new(e)
                .context(format!("Failed to read input after {} lines", self.read))),
            None => Ok(self.read),
        }
    }
}

impl LineReader<Box<dyn BufRead>> {
    /// Reads from `path`, or from stdin when no path is given
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let source: Box<dyn BufRead> = match path {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open input: {}", path.display()))?;
                Box::new(BufReader::new(file))
            }
            None => Box::new(io::stdin().lock()),
        };
        Ok(Self::new(source))
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.error.is_some() {
            return None;
        }

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                self.read += 1;
                Some(line)
            }
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

/// Reads every line of `reader` into memory
pub fn read_all<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut lines = LineReader::new(reader);
    let collected: Vec<String> = lines.by_ref().collect();
    lines.finish()?;
    Ok(collected)
}
