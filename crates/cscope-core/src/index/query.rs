//! Query interface for the symbol index.
//!
//! Provides whole-name pattern search and exact name lookup.
//! All queries are read-only and return borrowed views into the database.

use super::builder::Index;
use crate::database::{FileEntry, SymbolEntry, SymbolId};
use crate::error::SearchError;
use crate::marks::Mark;
use regex::Regex;
use std::fmt;

/// A symbol returned from a query.
#[derive(Debug, Clone, Copy)]
pub struct SymbolRef<'db> {
    id: SymbolId,
    entry: &'db SymbolEntry,
    file: &'db FileEntry,
}

impl<'db> SymbolRef<'db> {
    pub(crate) fn new(id: SymbolId, entry: &'db SymbolEntry, file: &'db FileEntry) -> Self {
        Self { id, entry, file }
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn name(&self) -> &'db str {
        &self.entry.name
    }

    pub fn line(&self) -> usize {
        self.entry.line
    }

    pub fn mark(&self) -> Option<Mark> {
        self.entry.mark
    }

    pub fn file_path(&self) -> &'db str {
        &self.file.path
    }

    pub fn entry(&self) -> &'db SymbolEntry {
        self.entry
    }
}

impl PartialEq for SymbolRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SymbolRef<'_> {}

impl fmt::Display for SymbolRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in {}:{}",
            self.name(),
            self.file_path(),
            self.line()
        )
    }
}

/// The matches of one query. Dropping it releases everything it holds.
#[derive(Debug, Clone, Default)]
pub struct SearchResults<'db> {
    matches: Vec<SymbolRef<'db>>,
    total: usize,
}

impl<'db> SearchResults<'db> {
    fn new(matches: Vec<SymbolRef<'db>>) -> Self {
        let total = matches.len();
        Self { matches, total }
    }

    /// Number of matches held.
    pub fn count(&self) -> usize {
        self.matches.len()
    }

    /// Number of matches found, before any [`truncate_to`](Self::truncate_to).
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn as_slice(&self) -> &[SymbolRef<'db>] {
        &self.matches
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SymbolRef<'db>> {
        self.matches.iter()
    }

    /// Keep at most `limit` matches; 0 keeps everything.
    pub fn truncate_to(&mut self, limit: usize) {
        if limit > 0 {
            self.matches.truncate(limit);
        }
    }
}

impl<'db> IntoIterator for SearchResults<'db> {
    type Item = SymbolRef<'db>;
    type IntoIter = std::vec::IntoIter<SymbolRef<'db>>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.into_iter()
    }
}

impl<'a, 'db> IntoIterator for &'a SearchResults<'db> {
    type Item = &'a SymbolRef<'db>;
    type IntoIter = std::slice::Iter<'a, SymbolRef<'db>>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

/// Compile `pattern` so that it must match a whole name.
///
/// The pattern is checked on its own first: wrapping can make an invalid
/// pattern such as `a)|(b` parse.
fn compile_whole_name(pattern: &str) -> Result<Regex, SearchError> {
    Regex::new(pattern).map_err(|e| SearchError::invalid_pattern(pattern, e))?;
    Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| SearchError::invalid_pattern(pattern, e))
}

/// Find every indexed symbol whose entire name matches `pattern`.
///
/// Scans all entries in index order; the name buckets are not used as a
/// pre-filter since a pattern is not a literal name.
pub fn search<'db>(index: &Index<'db>, pattern: &str) -> Result<SearchResults<'db>, SearchError> {
    let re = compile_whole_name(pattern)?;
    let matches: Vec<SymbolRef<'db>> = index.iter().filter(|s| re.is_match(s.name())).collect();
    log::debug!("search '{}': {} matches", pattern, matches.len());
    Ok(SearchResults::new(matches))
}

/// Every symbol named exactly `name`, straight from the name buckets.
pub fn lookup_by_name<'db>(index: &Index<'db>, name: &str) -> SearchResults<'db> {
    SearchResults::new(index.get(name).to_vec())
}
