//! Load diagnostics and query errors.
//!
//! Loading never fails outright: each parser records what went wrong as a
//! [`Diagnostic`] and keeps going with default values, so a damaged database
//! still yields a usable (if partial) index. Query-time failures are reported
//! through [`SearchError`].

use std::fmt;

/// Region of the database a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    Symbols,
    Trailer,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::Symbols => "symbol section",
            Section::Trailer => "trailer",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recoverable problem found while loading a database.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    /// Missing magic token or unparsable mandatory header fields.
    #[error("malformed header: {reason}")]
    MalformedHeader { reason: String },

    /// The header names a trailer offset outside `start..=len`.
    #[error("trailer offset {offset} is outside the symbol data ({start}..={len})")]
    TrailerOutOfRange {
        offset: usize,
        start: usize,
        len: usize,
    },

    /// Data ran out before a grammar rule completed.
    #[error("{section} truncated at byte {offset}")]
    TruncatedInput { section: Section, offset: usize },
}

impl Diagnostic {
    pub(crate) fn malformed_header(reason: impl Into<String>) -> Self {
        Diagnostic::MalformedHeader {
            reason: reason.into(),
        }
    }
}

/// Output of one parser: the (possibly partial) value plus everything it
/// had to paper over to produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Parsed<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Errors surfaced to the caller at query time.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl SearchError {
    pub(crate) fn invalid_pattern(pattern: &str, err: regex::Error) -> Self {
        SearchError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        }
    }
}
