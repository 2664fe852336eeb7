//! Interactive duplicate prompt.
//!
//! The core never talks to a terminal: it asks a `DuplicatePrompt` for a
//! `Decision`. Plain closures work for tests and embedding; `StdinPrompt`
//! is the terminal-facing implementation used by the binary.

use chrono::{DateTime, Local};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::policy::Decision;

/// Decides what to do with one colliding file.
pub trait DuplicatePrompt {
    /// `existing` is the file already in root, `incoming` the candidate.
    /// An `Err` aborts the run after recording the current file as failed.
    fn decide(&mut self, existing: &Path, incoming: &Path) -> io::Result<Decision>;
}

impl<F> DuplicatePrompt for F
where
    F: FnMut(&Path, &Path) -> Decision,
{
    fn decide(&mut self, existing: &Path, incoming: &Path) -> io::Result<Decision> {
        Ok(self(existing, incoming))
    }
}

/// Line-based prompt over any reader/writer pair (stdin/stderr in the binary).
pub struct StdinPrompt<R, W> {
    input: R,
    output: W,
}

impl StdinPrompt<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on the process terminal.
    pub fn terminal() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> StdinPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> DuplicatePrompt for StdinPrompt<R, W> {
    fn decide(&mut self, existing: &Path, incoming: &Path) -> io::Result<Decision> {
        let name = incoming
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| incoming.display().to_string());

        writeln!(self.output)?;
        writeln!(self.output, "File '{name}' already exists in destination.")?;
        writeln!(self.output, "  existing: {}", describe(existing))?;
        writeln!(self.output, "  incoming: {}", describe(incoming))?;
        loop {
            write!(
                self.output,
                "Choose action:\n[S]kip\n[R]ename with counter\n[T]imestamp rename\n[O]verwrite\nYour choice [S/R/T/O]: "
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed while waiting for a choice",
                ));
            }
            match Decision::from_letter(&line) {
                Some(d) => return Ok(d),
                None => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
        }
    }
}

/// "path (N bytes, modified YYYY-mm-dd HH:MM:SS)", degrading gracefully if stat fails.
fn describe(path: &Path) -> String {
    match fs::symlink_metadata(path) {
        Ok(meta) => {
            let modified = meta
                .modified()
                .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|_| "unknown".into());
            format!("{} ({} bytes, modified {})", path.display(), meta.len(), modified)
        }
        Err(_) => path.display().to_string(),
    }
}
