//! Trailer parsing: view paths, source files and include files.
//!
//! The trailer is a run of count-then-list blocks:
//!
//! ```text
//! <n viewpaths>\n<path>\n...
//! <n sources>\n<path>\n...
//! <n includes>\n<include bytes>\n<path>\n...
//! ```

use crate::cursor::{Cursor, parse_count};
use crate::error::{Diagnostic, Parsed, Section};
use crate::header::Header;

/// Metadata stored after the symbol section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trailer {
    pub n_viewpaths: usize,
    pub viewpath_dirs: Vec<String>,
    pub n_srcs: usize,
    pub srcs: Vec<String>,
    pub n_incs: usize,
    /// Declared size of the include list data; not interpreted.
    pub inc_bytes: usize,
    pub incs: Vec<String>,
}

impl Trailer {
    pub fn is_empty(&self) -> bool {
        self.n_viewpaths == 0 && self.n_srcs == 0 && self.n_incs == 0
    }
}

/// Read `n` lines into `out`. Returns false if the data ran out first.
fn read_list(cursor: &mut Cursor<'_>, n: usize, out: &mut Vec<String>) -> bool {
    for _ in 0..n {
        match cursor.read_line() {
            Some(line) => out.push(String::from_utf8_lossy(line).into_owned()),
            None => return false,
        }
    }
    true
}

/// Parse the trailer the header points at.
///
/// An out-of-range offset yields an empty trailer; that case is reported by
/// the header parser, not here.
pub fn parse_trailer(data: &[u8], header: &Header) -> Parsed<Trailer> {
    let mut trailer = Trailer::default();
    if !header.trailer_in_range(data.len()) {
        return Parsed::clean(trailer);
    }

    let mut cursor = Cursor::at(data, header.trailer_offset);
    if cursor.at_end() {
        return Parsed::clean(trailer);
    }

    let complete = 'blocks: {
        let Some(line) = cursor.read_line() else {
            break 'blocks false;
        };
        trailer.n_viewpaths = parse_count(line);
        if !read_list(&mut cursor, trailer.n_viewpaths, &mut trailer.viewpath_dirs) {
            break 'blocks false;
        }

        let Some(line) = cursor.read_line() else {
            break 'blocks false;
        };
        trailer.n_srcs = parse_count(line);
        if !read_list(&mut cursor, trailer.n_srcs, &mut trailer.srcs) {
            break 'blocks false;
        }

        let Some(line) = cursor.read_line() else {
            break 'blocks false;
        };
        trailer.n_incs = parse_count(line);
        let Some(line) = cursor.read_line() else {
            break 'blocks false;
        };
        trailer.inc_bytes = parse_count(line);
        read_list(&mut cursor, trailer.n_incs, &mut trailer.incs)
    };

    log::debug!(
        "trailer: {} viewpaths, {} sources, {} includes",
        trailer.n_viewpaths,
        trailer.n_srcs,
        trailer.n_incs
    );

    if complete {
        Parsed::clean(trailer)
    } else {
        Parsed {
            value: trailer,
            diagnostics: vec![Diagnostic::TruncatedInput {
                section: Section::Trailer,
                offset: cursor.offset(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a buffer whose trailer starts right after a fake header.
    fn buffer(trailer: &str) -> (Vec<u8>, Header) {
        let head = "cscope dir 15 0\n";
        let data = format!("{}{}", head, trailer).into_bytes();
        let header = Header {
            symbols_start: head.len(),
            trailer_offset: head.len(),
            ..Default::default()
        };
        (data, header)
    }

    #[test]
    fn parses_all_three_blocks() {
        let (data, header) = buffer("1\n.\n2\nmain.c\nutil.c\n1\n12\nutil.h\n");
        let parsed = parse_trailer(&data, &header);
        assert!(parsed.is_clean(), "{:?}", parsed.diagnostics);
        let t = parsed.value;
        assert_eq!(t.viewpath_dirs, vec!["."]);
        assert_eq!(t.n_srcs, 2);
        assert_eq!(t.srcs, vec!["main.c", "util.c"]);
        assert_eq!(t.n_incs, 1);
        assert_eq!(t.inc_bytes, 12);
        assert_eq!(t.incs, vec!["util.h"]);
    }

    #[test]
    fn malformed_counts_become_empty_blocks() {
        let (data, header) = buffer("junk\nnope\n0\n0\n");
        let parsed = parse_trailer(&data, &header);
        assert!(parsed.is_clean());
        assert!(parsed.value.is_empty());
    }

    #[test]
    fn out_of_range_offset_is_empty_and_silent() {
        let (data, mut header) = buffer("1\n.\n0\n0\n0\n");
        header.trailer_offset = data.len() + 10;
        let parsed = parse_trailer(&data, &header);
        assert!(parsed.is_clean());
        assert!(parsed.value.is_empty());

        header.trailer_offset = 0;
        assert!(parse_trailer(&data, &header).value.is_empty());
    }

    #[test]
    fn trailer_at_end_of_data_is_empty() {
        let (data, mut header) = buffer("");
        header.trailer_offset = data.len();
        let parsed = parse_trailer(&data, &header);
        assert!(parsed.is_clean());
        assert!(parsed.value.is_empty());
    }

    #[test]
    fn short_source_list_is_truncated() {
        let (data, header) = buffer("0\n3\na.c\nb.c\n");
        let parsed = parse_trailer(&data, &header);
        assert_eq!(parsed.value.n_srcs, 3);
        assert_eq!(parsed.value.srcs, vec!["a.c", "b.c"]);
        assert!(matches!(
            parsed.diagnostics[..],
            [Diagnostic::TruncatedInput {
                section: Section::Trailer,
                ..
            }]
        ));
    }
}
