//! Symbol index — name-keyed lookup and pattern search over a loaded database.
//!
//! The index borrows the [`Database`](crate::Database) it was built from and
//! is read-only once built. Ordering is deterministic: buckets appear in the
//! order their names were first declared, and each bucket keeps declaration
//! order.

pub mod builder;
pub mod query;

pub use builder::{Index, build_index};
pub use query::{SearchResults, SymbolRef, lookup_by_name, search};
