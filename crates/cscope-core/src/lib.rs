//! cscope-core: loader and pattern search for cscope cross-reference databases
//!
//! Reads the `cscope.out` format (header line, symbol section, trailer) into
//! an owned in-memory model, then builds a name index over it that answers
//! whole-name regular expression queries.
//!
//! # Quick Start
//!
//! ```no_run
//! use cscope_core::{Database, build_index};
//!
//! fn main() -> std::io::Result<()> {
//!     let data = std::fs::read("cscope.out")?;
//!     let db = Database::load("cscope.out", &data);
//!     println!("{}", db);
//!
//!     let index = build_index(&db);
//!     match index.search("parse_.*") {
//!         Ok(results) => {
//!             for sym in &results {
//!                 println!("{}", sym);
//!             }
//!         }
//!         Err(e) => eprintln!("{}", e),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Loading never fails; see [`Database::diagnostics`] for what had to be
//! skipped on a damaged database.

pub mod cursor;
pub mod database;
pub mod error;
pub mod header;
pub mod index;
pub mod marks;
pub mod symbols;
pub mod trailer;

pub use database::{Database, FileEntry, FileId, LoadOptions, SymbolEntry, SymbolId, load};
pub use error::{Diagnostic, Parsed, SearchError, Section};
pub use header::{Header, MAGIC};
pub use index::{Index, SearchResults, SymbolRef, build_index, lookup_by_name, search};
pub use marks::{Mark, is_mark};
pub use trailer::Trailer;
