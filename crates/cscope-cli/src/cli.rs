//! CLI argument parsing with clap.
//!
//! This module handles parsing command-line arguments and deciding which
//! mode the binary runs in.

use clap::error::ErrorKind as ClapErrorKind;
use clap::{ArgAction, Parser};
use std::io::{self, ErrorKind};
use std::path::PathBuf;

/// cscope-search - query a cscope symbol database
#[derive(Parser, Debug)]
#[command(
    name = "cscope-search",
    version,
    about = "Load a cscope symbol database and search it by regular expression",
    after_help = CLI_AFTER_HELP
)]
pub struct Cli {
    /// Path to the cscope database (usually cscope.out)
    #[arg(value_name = "DATABASE")]
    pub database: PathBuf,

    /// Search for symbols whose whole name matches PATTERN, then exit (repeatable)
    #[arg(
        short = 'e',
        long = "query",
        value_name = "PATTERN",
        allow_hyphen_values = true
    )]
    pub queries: Vec<String>,

    /// Look up symbols named exactly NAME, then exit (repeatable)
    #[arg(short = 'x', long = "exact", value_name = "NAME")]
    pub exact: Vec<String>,

    /// Print every file and symbol in the database, then exit
    #[arg(long = "dump")]
    pub dump: bool,

    /// Print at most N matches per query (0 = unlimited)
    #[arg(short = 'n', long = "max-results", value_name = "N")]
    pub max_results: Option<usize>,

    /// Read the database into memory instead of memory-mapping it
    #[arg(long = "no-mmap")]
    pub no_mmap: bool,

    /// Treat letter marks (c e g l m p s t u) as marks, not name characters
    #[arg(long = "letter-marks")]
    pub letter_marks: bool,

    /// Append the mark description to each match
    #[arg(short = 'm', long = "show-marks")]
    pub show_marks: bool,

    /// Configuration file (overrides CSCOPE_SEARCH_CONFIG and the default location)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

const CLI_AFTER_HELP: &str = r#"EXAMPLES:
  cscope-search cscope.out                 Interactive search
  cscope-search -e 'parse_.*' cscope.out   One-shot regex search
  cscope-search -x main cscope.out         Exact-name lookup
  cscope-search --dump cscope.out          List every file and symbol

PATTERNS:
  A pattern must match the whole symbol name: 'parse' does not match
  'parse_args', 'parse.*' does.

CONFIGURATION:
  Read from --config, else $CSCOPE_SEARCH_CONFIG, else
  <config dir>/cscope-search/config.toml. Flags override the file."#;

/// A single one-shot query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Pattern(String),
    Exact(String),
}

/// What the binary does after loading the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Dump,
    OneShot(Vec<Query>),
    Interactive,
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn parse_args() -> io::Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        Self::parse_from_args(&args)
    }

    /// Parse CLI arguments from a slice (testable version)
    pub fn parse_from_args(args: &[String]) -> io::Result<Self> {
        match Self::try_parse_from(args) {
            Ok(cli) => Ok(cli),
            Err(e) if matches!(e.kind(), ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(e) => {
                let msg = e.to_string();
                if msg.contains("unexpected argument") || msg.contains("invalid value") {
                    Err(io::Error::new(ErrorKind::InvalidInput, msg))
                } else {
                    Err(io::Error::other(msg))
                }
            }
        }
    }

    /// `--dump` wins; any `-e`/`-x` makes the run one-shot.
    pub fn mode(&self) -> Mode {
        if self.dump {
            return Mode::Dump;
        }
        let queries: Vec<Query> = self
            .queries
            .iter()
            .cloned()
            .map(Query::Pattern)
            .chain(self.exact.iter().cloned().map(Query::Exact))
            .collect();
        if queries.is_empty() {
            Mode::Interactive
        } else {
            Mode::OneShot(queries)
        }
    }

    /// Default `env_logger` filter for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
