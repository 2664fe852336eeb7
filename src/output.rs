//! User-facing terminal output.
//!
//! Status lines go to stderr so stdout stays parseable; the run summary goes
//! to stdout. Colors are enabled only when the target stream is a TTY.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::stats::RunStats;

fn stderr_is_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

fn stdout_is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "info:".cyan().bold(), msg);
    } else {
        eprintln!("info: {msg}");
    }
}

pub fn print_warn(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {msg}");
    }
}

pub fn print_error(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {msg}");
    }
}

/// Human summary: the three count lines, then one line per recorded error.
pub fn write_summary<W: Write>(w: &mut W, stats: &RunStats, color: bool) -> io::Result<()> {
    writeln!(w)?;
    if stats.aborted {
        let line = "Operation aborted:";
        if color {
            writeln!(w, "{}", line.red().bold())?;
        } else {
            writeln!(w, "{line}")?;
        }
    } else {
        writeln!(w, "Operation completed:")?;
    }

    if color {
        writeln!(w, "Files moved: {}", stats.moved.green())?;
        writeln!(w, "Files skipped: {}", stats.skipped.yellow())?;
        if stats.errors > 0 {
            writeln!(w, "Errors encountered: {}", stats.errors.red().bold())?;
        } else {
            writeln!(w, "Errors encountered: {}", stats.errors)?;
        }
    } else {
        writeln!(w, "Files moved: {}", stats.moved)?;
        writeln!(w, "Files skipped: {}", stats.skipped)?;
        writeln!(w, "Errors encountered: {}", stats.errors)?;
    }

    for d in &stats.error_details {
        writeln!(w, "  [{}] {}: {}", d.kind, d.path.display(), d.message)?;
    }
    Ok(())
}

/// `RunStats` as pretty JSON, newline-terminated.
pub fn write_summary_json<W: Write>(w: &mut W, stats: &RunStats) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, stats).map_err(io::Error::other)?;
    writeln!(w)
}

pub fn print_summary(stats: &RunStats) -> io::Result<()> {
    let stdout = io::stdout();
    write_summary(&mut stdout.lock(), stats, stdout_is_tty())
}

pub fn print_summary_json(stats: &RunStats) -> io::Result<()> {
    write_summary_json(&mut io::stdout().lock(), stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::ErrorDetail;
    use std::path::PathBuf;

    fn sample() -> RunStats {
        RunStats {
            candidates: 4,
            moved: 2,
            skipped: 1,
            errors: 1,
            aborted: false,
            error_details: vec![ErrorDetail {
                path: PathBuf::from("/r/a/x.txt"),
                kind: "move_failed",
                message: "Move failed for '/r/a/x.txt': disk full".into(),
            }],
        }
    }

    #[test]
    fn plain_summary_lines() {
        let mut buf = Vec::new();
        write_summary(&mut buf, &sample(), false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Operation completed:"));
        assert!(text.contains("Files moved: 2\n"));
        assert!(text.contains("Files skipped: 1\n"));
        assert!(text.contains("Errors encountered: 1\n"));
        assert!(text.contains("[move_failed] /r/a/x.txt"));
    }

    #[test]
    fn aborted_runs_say_so() {
        let stats = RunStats {
            aborted: true,
            ..sample()
        };
        let mut buf = Vec::new();
        write_summary(&mut buf, &stats, false).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("Operation aborted:"));
    }

    #[test]
    fn json_summary_parses_back() {
        let mut buf = Vec::new();
        write_summary_json(&mut buf, &sample()).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["moved"], 2);
        assert_eq!(v["error_details"][0]["kind"], "move_failed");
    }
}
