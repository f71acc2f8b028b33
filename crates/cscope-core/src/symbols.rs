//! Symbol section parsing.
//!
//! Between the header and the trailer, each source file is a block:
//!
//! ```text
//! \t@path/to/file.c
//! <blank>
//! <lineno> <source text>
//! <mark><symbol>
//! <source text>
//! ...
//! <blank>
//! <lineno> ...
//! ```
//!
//! There is no framing beyond newlines and mark bytes, so the parser is a
//! small state machine that has to "un-read" the `@` line that tells it the
//! current file is over. cscope ends the section with a lone `\t@` line.
//!
//! Letter marks (`g`, `m`, `s`, ...) cannot be told apart from the first
//! letter of an unmarked name, so they are only stripped when
//! [`LoadOptions::letter_marks`] is set. Punctuation marks always are.
//! A line holding a single mark byte is never a symbol, so one-letter names
//! in `c e g l m p s t u` are not indexed in either mode.

use crate::cursor::{Cursor, parse_count, trim_start};
use crate::database::{FileEntry, FileId, LoadOptions};
use crate::error::{Diagnostic, Parsed, Section};
use crate::header::Header;
use crate::marks::{Mark, is_mark};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Expecting `<mark><path>` for a new file.
    AwaitFileHeader,
    /// Expecting a line-number line, or the `@` line of the next file.
    AwaitGroupOrNextFile,
    /// Inside a line-number group: symbols until a blank line.
    AwaitSymbolOrEnd { line: usize },
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Parse every file block of the symbol section.
pub fn parse_symbols(
    data: &[u8],
    header: &Header,
    options: &LoadOptions,
) -> Parsed<Vec<FileEntry>> {
    let end = header.symbols_end(data.len());
    let start = header.symbols_start.min(end);
    let mut cursor = Cursor::at(&data[..end], start);

    let mut files: Vec<FileEntry> = Vec::new();
    let mut truncated_at = None;
    let mut state = State::AwaitFileHeader;

    loop {
        state = match state {
            State::AwaitFileHeader => {
                let Some(line) = cursor.read_line() else {
                    break;
                };
                let Some((&mark, path)) = trim_start(line).split_first() else {
                    continue;
                };
                if path.is_empty() {
                    log::trace!("end of symbol data at byte {}", cursor.offset());
                    break;
                }
                let id = FileId(files.len());
                files.push(FileEntry::new(id, mark, lossy(path)));
                log::trace!("file {}: {}", id.index(), String::from_utf8_lossy(path));

                // Blank separator after the file line.
                if cursor.read_line().is_none() {
                    truncated_at = Some(cursor.offset());
                    break;
                }
                State::AwaitGroupOrNextFile
            }

            State::AwaitGroupOrNextFile => {
                let Some(line) = cursor.read_line() else {
                    break;
                };
                if trim_start(line).first() == Some(&b'@') {
                    cursor.rewind(cursor.last_line_len());
                    State::AwaitFileHeader
                } else {
                    State::AwaitSymbolOrEnd {
                        line: parse_count(line),
                    }
                }
            }

            State::AwaitSymbolOrEnd { line: lineno } => {
                let Some(line) = cursor.read_line() else {
                    truncated_at = Some(cursor.offset());
                    break;
                };
                if line.is_empty() {
                    State::AwaitGroupOrNextFile
                } else {
                    let mut text = trim_start(line);
                    let mut mark = None;
                    if let [b] = text
                        && is_mark(*b)
                    {
                        // A lone mark is a separator, not a symbol.
                        text = &[];
                    } else if let Some(m) = text.first().and_then(|&b| Mark::from_byte(b))
                        && (options.letter_marks || !m.is_letter())
                    {
                        mark = Some(m);
                        text = &text[1..];
                    }
                    if !text.is_empty() {
                        let Some(file) = files.last_mut() else {
                            break;
                        };
                        file.push_symbol(mark, lineno, lossy(text));

                        // Echoed source text follows every symbol.
                        if cursor.read_line().is_none() {
                            truncated_at = Some(cursor.offset());
                            break;
                        }
                    }
                    State::AwaitSymbolOrEnd { line: lineno }
                }
            }
        };
    }

    if truncated_at.is_none() && cursor.is_truncated() {
        truncated_at = Some(cursor.offset());
    }
    let diagnostics = truncated_at
        .map(|offset| Diagnostic::TruncatedInput {
            section: Section::Symbols,
            offset,
        })
        .into_iter()
        .collect();

    Parsed {
        value: files,
        diagnostics,
    }
}

/// All symbols of `file` as `(line, name)` pairs; test helper shared with
/// the database tests.
#[cfg(test)]
pub(crate) fn line_names(file: &FileEntry) -> Vec<(usize, &str)> {
    file.symbols()
        .iter()
        .map(|s| (s.line, s.name.as_str()))
        .collect()
}
