//! The in-memory database model and the loader that builds it.
//!
//! [`Database::load`] runs the header, trailer and symbol-section parsers in
//! that order over a borrowed buffer. Every string it keeps is copied out,
//! so the buffer (often a memory map) can be dropped as soon as loading
//! returns.

use crate::error::Diagnostic;
use crate::header::{Header, parse_header};
use crate::marks::Mark;
use crate::symbols::parse_symbols;
use crate::trailer::{Trailer, parse_trailer};
use std::fmt;
use std::io::{self, Write};

/// Position of a file in [`Database::files`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub(crate) usize);

impl FileId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Position of a symbol: owning file plus index within that file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId {
    pub file: FileId,
    pub index: usize,
}

/// One symbol occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub mark: Option<Mark>,
    /// 1-based source line.
    pub line: usize,
    pub name: String,
    /// Owning file. Used for reporting only.
    pub file: FileId,
}

/// A source file and the symbols declared in it, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Mark byte from the file header line (normally `@`).
    pub mark: u8,
    pub path: String,
    id: FileId,
    syms: Vec<SymbolEntry>,
}

impl FileEntry {
    pub(crate) fn new(id: FileId, mark: u8, path: String) -> Self {
        Self {
            mark,
            path,
            id,
            syms: Vec::new(),
        }
    }

    pub(crate) fn push_symbol(&mut self, mark: Option<Mark>, line: usize, name: String) {
        self.syms.push(SymbolEntry {
            mark,
            line,
            name,
            file: self.id,
        });
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn symbols(&self) -> &[SymbolEntry] {
        &self.syms
    }

    pub fn n_syms(&self) -> usize {
        self.syms.len()
    }
}

/// Knobs for [`Database::load_with`].
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Strip letter marks (`c e g l m p s t u`) from symbol names as well as
    /// punctuation marks. cscope's writer always puts a mark behind a tab,
    /// but so do hand-written fixtures for unmarked names, so this is off
    /// by default.
    pub letter_marks: bool,
}

/// A loaded cscope database.
#[derive(Debug, Clone)]
pub struct Database {
    pub header: Header,
    pub trailer: Trailer,
    /// Where the bytes came from (usually a path), or empty.
    pub name: String,
    files: Vec<FileEntry>,
    n_syms: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Database {
    /// Parse `data` with default options.
    pub fn load(name: impl Into<String>, data: &[u8]) -> Self {
        Self::load_with(name, data, &LoadOptions::default())
    }

    /// Parse header, trailer and symbol section, in that order.
    ///
    /// Never panics on malformed input; problems are collected in
    /// [`diagnostics`](Self::diagnostics) and the result is whatever could
    /// be recovered.
    pub fn load_with(name: impl Into<String>, data: &[u8], options: &LoadOptions) -> Self {
        let name = name.into();
        let mut diagnostics = Vec::new();

        let header = parse_header(data);
        diagnostics.extend(header.diagnostics);
        let header = header.value;

        let trailer = parse_trailer(data, &header);
        diagnostics.extend(trailer.diagnostics);

        let files = parse_symbols(data, &header, options);
        diagnostics.extend(files.diagnostics);
        let files = files.value;

        for d in &diagnostics {
            log::info!("{}: {}", display_name(&name), d);
        }

        let n_syms = files.iter().map(FileEntry::n_syms).sum();
        log::debug!(
            "{}: {} symbols in {} files",
            display_name(&name),
            n_syms,
            files.len()
        );

        Self {
            header,
            trailer: trailer.value,
            name,
            files,
            n_syms,
            diagnostics,
        }
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn file(&self, id: FileId) -> Option<&FileEntry> {
        self.files.get(id.0)
    }

    /// The file declared after `id`, if any.
    pub fn next_file(&self, id: FileId) -> Option<&FileEntry> {
        self.files.get(id.0 + 1)
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&SymbolEntry> {
        self.file(id.file)?.syms.get(id.index)
    }

    /// Every symbol in file order, then declaration order.
    pub fn symbols(&self) -> impl Iterator<Item = (SymbolId, &SymbolEntry)> {
        self.files.iter().flat_map(|f| {
            f.syms.iter().enumerate().map(move |(index, s)| {
                (
                    SymbolId {
                        file: f.id,
                        index,
                    },
                    s,
                )
            })
        })
    }

    pub fn n_files(&self) -> usize {
        self.files.len()
    }

    pub fn n_syms(&self) -> usize {
        self.n_syms
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether anything went wrong while loading.
    pub fn is_flagged(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Write a per-file listing of every symbol.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}: cscope database dump", display_name(&self.name))?;
        writeln!(
            out,
            "version: {}  dir: {}  trailer at: {}",
            self.header.version, self.header.dir, self.header.trailer_offset
        )?;
        writeln!(out, "files: {}", self.files.len())?;
        for f in &self.files {
            writeln!(out, "\t{}: {} symbols", f.path, f.n_syms())?;
            for (i, s) in f.syms.iter().enumerate() {
                writeln!(
                    out,
                    "\t\t[{} of {}] {}:{}: {}",
                    i + 1,
                    f.n_syms(),
                    f.path,
                    s.line,
                    s.name
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Loaded {} symbols from {} files",
            self.n_syms,
            self.files.len()
        )
    }
}

fn display_name(name: &str) -> &str {
    if name.is_empty() { "<buffer>" } else { name }
}

/// Load an unnamed database from `data`.
pub fn load(data: &[u8]) -> Database {
    Database::load("", data)
}
