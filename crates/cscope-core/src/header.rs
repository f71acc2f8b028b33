//! Header line parsing.
//!
//! The first line of a cscope database looks like
//! `cscope <dir> <version> [-c] [-T] [-q] <trailer_offset>`.
//! cscope itself writes the version before the directory
//! (`cscope 15 /src -c 0000004711`); both orders are accepted.

use crate::cursor::Cursor;
use crate::error::{Diagnostic, Parsed};

/// Magic token every database starts with.
pub const MAGIC: &str = "cscope";

/// Parsed header line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub version: i32,
    pub dir: String,
    /// `-c` was given (cscope writes it when digraph compression is off).
    pub compression: bool,
    /// `-q`: an inverted index accompanies the database.
    pub inverted_index: bool,
    /// `-T`: symbols are matched on their first eight characters.
    pub prefix_match: bool,
    /// Byte offset just past the header line.
    pub symbols_start: usize,
    /// Byte offset of the trailer, as written in the header.
    pub trailer_offset: usize,
}

impl Header {
    /// Whether the trailer offset points inside `symbols_start..=len`.
    pub fn trailer_in_range(&self, len: usize) -> bool {
        (self.symbols_start..=len).contains(&self.trailer_offset)
    }

    /// Where the symbol section stops in a buffer of `len` bytes.
    pub fn symbols_end(&self, len: usize) -> usize {
        if self.trailer_in_range(len) {
            self.trailer_offset
        } else {
            len
        }
    }
}

fn is_decimal(tok: &str) -> bool {
    !tok.is_empty() && tok.bytes().all(|b| b.is_ascii_digit())
}

/// Parse the header line at the start of `data`.
///
/// Never fails: problems come back as diagnostics next to a best-effort
/// header. `symbols_start` is always set.
pub fn parse_header(data: &[u8]) -> Parsed<Header> {
    let mut header = Header::default();
    let mut diagnostics = Vec::new();

    if data.is_empty() {
        diagnostics.push(Diagnostic::malformed_header("empty input"));
        return Parsed {
            value: header,
            diagnostics,
        };
    }

    let mut cursor = Cursor::new(data);
    // A header with no newline is the whole buffer.
    let line = cursor.read_line().unwrap_or(data);
    header.symbols_start = cursor.offset();

    let text = String::from_utf8_lossy(line);
    let mut tokens = text.split_whitespace();

    if tokens.next() != Some(MAGIC) {
        diagnostics.push(Diagnostic::malformed_header(
            "missing 'cscope' magic token; not a cscope database",
        ));
        return Parsed {
            value: header,
            diagnostics,
        };
    }

    let (first, second) = match (tokens.next(), tokens.next()) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            diagnostics.push(Diagnostic::malformed_header(
                "too few tokens (expected directory and version)",
            ));
            return Parsed {
                value: header,
                diagnostics,
            };
        }
    };
    let (dir, version) = if is_decimal(first) && !is_decimal(second) {
        (second, first)
    } else {
        (first, second)
    };
    header.dir = dir.to_string();
    match version.parse::<i32>() {
        Ok(v) => header.version = v,
        Err(_) => diagnostics.push(Diagnostic::malformed_header(format!(
            "invalid version '{}'",
            version
        ))),
    }

    let mut offset_token = None;
    for tok in tokens {
        let bytes = tok.as_bytes();
        if bytes.len() == 2 && bytes[0] == b'-' {
            match bytes[1] {
                b'c' => header.compression = true,
                b'T' => header.prefix_match = true,
                b'q' => header.inverted_index = true,
                _ => {
                    diagnostics.push(Diagnostic::malformed_header(format!(
                        "unrecognized option '{}'",
                        tok
                    )));
                    return Parsed {
                        value: header,
                        diagnostics,
                    };
                }
            }
        } else {
            offset_token = Some(tok);
            break;
        }
    }

    match offset_token.map(|tok| (tok, tok.parse::<usize>())) {
        Some((_, Ok(offset))) => {
            header.trailer_offset = offset;
            if !header.trailer_in_range(data.len()) {
                diagnostics.push(Diagnostic::TrailerOutOfRange {
                    offset,
                    start: header.symbols_start,
                    len: data.len(),
                });
            }
        }
        Some((tok, Err(_))) => diagnostics.push(Diagnostic::malformed_header(format!(
            "invalid trailer offset '{}'",
            tok
        ))),
        None => diagnostics.push(Diagnostic::malformed_header("missing trailer offset")),
    }

    log::trace!(
        "header: version {} dir '{}' symbols at {} trailer at {}",
        header.version,
        header.dir,
        header.symbols_start,
        header.trailer_offset
    );

    Parsed {
        value: header,
        diagnostics,
    }
}
