//! Query sessions: the interactive loop and one-shot runs.

use crate::cli::Query;
use crate::output::OutputHandler;
use cscope_core::Index;
use std::io::{self, BufRead, Write};

/// Read queries from `input` until EOF, printing matches for each.
///
/// `prompt` is written before every read when set. Blank lines are skipped;
/// an invalid pattern is reported and the loop carries on.
pub fn run_interactive<R: BufRead, W: Write>(
    index: &Index<'_>,
    mut input: R,
    out: &mut W,
    output: &OutputHandler,
    prompt: Option<&str>,
) -> io::Result<()> {
    let mut line = String::new();
    loop {
        if let Some(prompt) = prompt {
            write!(out, "{}", prompt)?;
            out.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        match index.search(query) {
            Ok(results) => output.emit_results(out, results)?,
            Err(e) => output.error(&e.to_string()),
        }
    }

    // Leave the terminal on a fresh line after ^D.
    if prompt.is_some() {
        writeln!(out)?;
    }
    Ok(())
}

/// Run every query in order. Returns false if any pattern was invalid.
pub fn run_queries<W: Write>(
    index: &Index<'_>,
    queries: &[Query],
    out: &mut W,
    output: &OutputHandler,
) -> io::Result<bool> {
    let mut ok = true;
    for query in queries {
        match query {
            Query::Pattern(pattern) => match index.search(pattern) {
                Ok(results) => output.emit_results(out, results)?,
                Err(e) => {
                    output.error(&e.to_string());
                    ok = false;
                }
            },
            Query::Exact(name) => output.emit_results(out, index.lookup(name))?,
        }
    }
    Ok(ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cscope_core::{Database, build_index, load};
    use std::io::Cursor;

    fn db() -> Database {
        let symbols = "\t@main.c\n\n\
                       3 int main(void)\n\t$main\n(void)\n\n\
                       8 parse(argv);\n\t`parse\n(argv);\n\n\
                       \t@\n";
        let offset = "cscope 15 . 0000000000\n".len() + symbols.len();
        load(format!("cscope 15 . {:010}\n{}", offset, symbols).as_bytes())
    }

    fn interactive(input: &str, prompt: Option<&str>) -> String {
        let db = db();
        let index = build_index(&db);
        let mut out = Vec::new();
        run_interactive(
            &index,
            Cursor::new(input),
            &mut out,
            &OutputHandler::default(),
            prompt,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_queries_until_eof() {
        let text = interactive("main\n\n   \npar.*\n", None);
        assert_eq!(
            text,
            "Located 1 matches:\n1) main in main.c:3\n\
             Located 1 matches:\n1) parse in main.c:8\n"
        );
    }

    #[test]
    fn test_invalid_pattern_does_not_end_loop() {
        let text = interactive("[\nmain\n", None);
        assert_eq!(text, "Located 1 matches:\n1) main in main.c:3\n");
    }

    #[test]
    fn test_prompt_before_each_read() {
        let text = interactive("main\n", Some("Search> "));
        assert_eq!(
            text,
            "Search> Located 1 matches:\n1) main in main.c:3\nSearch> \n"
        );
    }

    #[test]
    fn test_last_line_without_newline() {
        let text = interactive("main", None);
        assert_eq!(text, "Located 1 matches:\n1) main in main.c:3\n");
    }

    #[test]
    fn test_one_shot_mixes_patterns_and_exact() {
        let db = db();
        let index = build_index(&db);
        let mut out = Vec::new();
        let queries = vec![
            Query::Pattern("m.*".to_string()),
            Query::Exact("parse".to_string()),
            Query::Exact("par".to_string()),
        ];
        let ok = run_queries(&index, &queries, &mut out, &OutputHandler::default()).unwrap();
        assert!(ok);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Located 1 matches:\n1) main in main.c:3\n\
             Located 1 matches:\n1) parse in main.c:8\n\
             Located 0 matches:\n"
        );
    }

    #[test]
    fn test_one_shot_reports_invalid_pattern() {
        let db = db();
        let index = build_index(&db);
        let mut out = Vec::new();
        let queries = vec![
            Query::Pattern("(".to_string()),
            Query::Pattern("main".to_string()),
        ];
        let ok = run_queries(&index, &queries, &mut out, &OutputHandler::default()).unwrap();
        assert!(!ok);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Located 1 matches:\n1) main in main.c:3\n"
        );
    }
}
