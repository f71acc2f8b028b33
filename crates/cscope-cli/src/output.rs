//! Output handling for the CLI.
//!
//! Match listings go to the given writer (stdout in practice); load
//! diagnostics and query errors go to stderr.

use crate::config::CliConfig;
use cscope_core::{Database, SearchResults};
use std::io::{self, Write};

/// CLI output handler: results to a writer, diagnostics to stderr.
#[derive(Debug, Default)]
pub struct OutputHandler {
    show_marks: bool,
    max_results: usize,
}

impl OutputHandler {
    pub fn new(config: &CliConfig) -> Self {
        Self {
            show_marks: config.show_marks,
            max_results: config.max_results,
        }
    }

    /// Print one `[WARN]` line per load diagnostic.
    pub fn diagnostics(&self, db: &Database) {
        for d in db.diagnostics() {
            eprintln!("[WARN] {}: {}", db.name, d);
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("[ERROR] {}", message);
    }

    /// Write `Located <n> matches:` and one numbered line per match.
    pub fn emit_results<W: Write>(
        &self,
        out: &mut W,
        mut results: SearchResults<'_>,
    ) -> io::Result<()> {
        results.truncate_to(self.max_results);
        writeln!(out, "Located {} matches:", results.total())?;
        for (i, sym) in results.iter().enumerate() {
            write!(out, "{}) {}", i + 1, sym)?;
            if self.show_marks
                && let Some(mark) = sym.mark()
            {
                write!(out, " [{}]", mark)?;
            }
            writeln!(out)?;
        }
        let hidden = results.total() - results.count();
        if hidden > 0 {
            writeln!(out, "[{} more not shown]", hidden)?;
        }
        Ok(())
    }
}
