//! End-to-end tests: bytes (or a file on disk) in, search results out.

use cscope_core::{Database, Diagnostic, Mark, SearchError, build_index, load};
use std::fs;
use tempfile::TempDir;

/// A small but complete database in the layout cscope writes.
fn fixture() -> Vec<u8> {
    let symbols = "\t@src/main.c\n\n\
                   1 #include \"args.h\"\n\
                   \t~args.h\n\
                   \"\n\
                   \n\
                   5 int main(int argc, char **argv)\n\
                   \t$main\n\
                   (int argc, char **argv)\n\
                   \n\
                   7 return parse_args(argc, argv);\n\
                   \t`parse_args\n\
                   (argc, argv);\n\
                   \t}\n\
                   \n\
                   \t@src/args.c\n\n\
                   3 int parse_args(int argc, char **argv)\n\
                   \t$parse_args\n\
                   (int argc, char **argv)\n\
                   \n\
                   4 int verbose = 0;\n\
                   verbose\n\
                   = 0;\n\
                   \n\
                   \t@\n";
    let trailer = "1\n.\n2\nsrc/main.c\nsrc/args.c\n1\n7\nargs.h\n";
    let head_len = "cscope 15 /work -c 0000000000\n".len();
    format!(
        "cscope 15 /work -c {:010}\n{}{}",
        head_len + symbols.len(),
        symbols,
        trailer
    )
    .into_bytes()
}

#[test]
fn header_scenario_with_directory_first() {
    let mut data = b"cscope my/dir 15 -c 120\n".to_vec();
    data.resize(200, b'\n');
    let db = load(&data);
    assert_eq!(db.header.version, 15);
    assert_eq!(db.header.dir, "my/dir");
    assert!(db.header.compression);
    assert_eq!(db.header.trailer_offset, 120);
    assert_eq!(db.header.symbols_start, "cscope my/dir 15 -c 120\n".len());
}

#[test]
fn header_scenario_reports_short_buffer() {
    let db = load(b"cscope my/dir 15 -c 120\n");
    assert_eq!(db.header.trailer_offset, 120);
    assert!(db.diagnostics().iter().any(|d| matches!(
        d,
        Diagnostic::TrailerOutOfRange { offset: 120, .. }
    )));
}

#[test]
fn file_block_scenario() {
    let block = "@foo.c\n\n10\n\tmain\n<text>\n\n";
    let header = format!("cscope . 15 {:06}\n", "cscope . 15 000000\n".len() + block.len());
    let db = load(format!("{}{}", header, block).as_bytes());
    assert!(!db.is_flagged(), "{:?}", db.diagnostics());
    assert_eq!(db.n_files(), 1);
    let file = &db.files()[0];
    assert_eq!(file.path, "foo.c");
    assert_eq!(file.n_syms(), 1);
    assert_eq!(file.symbols()[0].name, "main");
    assert_eq!(file.symbols()[0].line, 10);
}

#[test]
fn full_database_loads_cleanly() {
    let db = Database::load("cscope.out", &fixture());
    assert!(!db.is_flagged(), "{:?}", db.diagnostics());
    assert_eq!(db.header.dir, "/work");
    assert_eq!(db.n_files(), 2);
    assert_eq!(db.n_syms(), 5);
    assert_eq!(db.trailer.srcs, vec!["src/main.c", "src/args.c"]);
    assert_eq!(db.trailer.n_incs, 1);
    assert_eq!(db.trailer.inc_bytes, 7);
    assert_eq!(db.trailer.incs, vec!["args.h"]);
    assert_eq!(db.to_string(), "Loaded 5 symbols from 2 files");
}

#[test]
fn search_across_files() {
    let db = load(&fixture());
    let index = build_index(&db);
    assert_eq!(index.len(), db.n_syms());

    let results = index.search("parse_args").unwrap();
    let rendered: Vec<String> = results.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec!["parse_args in src/main.c:7", "parse_args in src/args.c:3"]
    );
    assert_eq!(results.as_slice()[0].mark(), Some(Mark::FunctionCall));
    assert_eq!(results.as_slice()[1].mark(), Some(Mark::FunctionDefinition));

    let unmarked = index.lookup("verbose");
    assert_eq!(unmarked.count(), 1);
    assert_eq!(unmarked.as_slice()[0].mark(), None);
}

#[test]
fn bad_pattern_then_good_pattern() {
    let db = load(&fixture());
    let index = build_index(&db);
    assert!(matches!(
        index.search("(unclosed"),
        Err(SearchError::InvalidPattern { .. })
    ));
    assert_eq!(index.search("m.*").unwrap().count(), 1);
}

#[test]
fn loads_from_file_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cscope.out");
    fs::write(&path, fixture()).unwrap();

    let data = fs::read(&path).unwrap();
    let db = Database::load(path.display().to_string(), &data);
    drop(data);

    assert_eq!(db.n_syms(), 5);
    let index = build_index(&db);
    assert_eq!(index.lookup("main").count(), 1);
}

#[test]
fn truncated_database_keeps_what_it_read() {
    let full = fixture();
    let cut = full.len() / 2;
    let db = load(&full[..cut]);
    assert!(db.is_flagged());
    assert!(db.n_files() >= 1);
    assert_eq!(db.files()[0].path, "src/main.c");
}
