//! Output helpers shared by the commands.
//!
//! Rendered lists and JSON go to stdout. Notes, hints and errors go to
//! stderr so `fetch --json` output stays pipeable.

use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a dimmed note to stderr.
pub fn note(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print each item as one JSON document per line, or pretty-printed.
pub fn json_lines<T: Serialize>(items: &[T], pretty: bool) -> Result<()> {
    let mut out = std::io::stdout().lock();
    for item in items {
        if pretty {
            serde_json::to_writer_pretty(&mut out, item)?;
        } else {
            serde_json::to_writer(&mut out, item)?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
