//! Index construction.

use super::query::{SearchResults, SymbolRef, lookup_by_name, search};
use crate::database::Database;
use crate::error::SearchError;
use indexmap::IndexMap;

/// Multi-valued map from symbol name to every symbol carrying it.
#[derive(Debug, Clone)]
pub struct Index<'db> {
    db: &'db Database,
    by_name: IndexMap<&'db str, Vec<SymbolRef<'db>>>,
    len: usize,
}

impl<'db> Index<'db> {
    /// Insert every symbol of every file, in file then declaration order.
    pub fn build(db: &'db Database) -> Self {
        let mut by_name: IndexMap<&'db str, Vec<SymbolRef<'db>>> = IndexMap::new();
        let mut len = 0;
        for (id, entry) in db.symbols() {
            let Some(file) = db.file(id.file) else {
                continue;
            };
            by_name
                .entry(entry.name.as_str())
                .or_default()
                .push(SymbolRef::new(id, entry, file));
            len += 1;
        }
        log::debug!(
            "indexed {} symbols under {} names",
            len,
            by_name.len()
        );
        Self { db, by_name, len }
    }

    pub fn database(&self) -> &'db Database {
        self.db
    }

    /// Total number of indexed symbols.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn distinct_names(&self) -> usize {
        self.by_name.len()
    }

    /// Every symbol sharing exactly `name`.
    pub fn get(&self, name: &str) -> &[SymbolRef<'db>] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All indexed symbols, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = SymbolRef<'db>> + '_ {
        self.by_name.values().flatten().copied()
    }

    /// Whole-name regular expression search; see [`search`].
    pub fn search(&self, pattern: &str) -> Result<SearchResults<'db>, SearchError> {
        search(self, pattern)
    }

    /// Exact-name lookup; see [`lookup_by_name`].
    pub fn lookup(&self, name: &str) -> SearchResults<'db> {
        lookup_by_name(self, name)
    }
}

/// Build the index for `db`.
pub fn build_index(db: &Database) -> Index<'_> {
    Index::build(db)
}
