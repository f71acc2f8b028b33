//! CLI configuration file.
//!
//! A small TOML file controls presentation and loading defaults. Command-line
//! flags override whatever the file says.

use crate::cli::Cli;
use cscope_core::LoadOptions;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "CSCOPE_SEARCH_CONFIG";

// ============================================================================
// Default Functions
// ============================================================================

fn default_prompt() -> String {
    "Search> ".to_string()
}

fn default_true_val() -> bool {
    true
}

// ============================================================================
// Configuration Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Interactive prompt, shown only when stdin is a terminal
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Maximum matches printed per query (0 = unlimited)
    #[serde(default)]
    pub max_results: usize,
    /// Memory-map the database instead of reading it
    #[serde(default = "default_true_val")]
    pub use_mmap: bool,
    /// Append the mark description to each match
    #[serde(default)]
    pub show_marks: bool,
    /// Strip letter marks from symbol names
    #[serde(default)]
    pub letter_marks: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            max_results: 0,
            use_mmap: true,
            show_marks: false,
            letter_marks: false,
        }
    }
}

impl CliConfig {
    /// Layer command-line flags over file values.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(n) = cli.max_results {
            self.max_results = n;
        }
        if cli.no_mmap {
            self.use_mmap = false;
        }
        if cli.show_marks {
            self.show_marks = true;
        }
        if cli.letter_marks {
            self.letter_marks = true;
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            letter_marks: self.letter_marks,
        }
    }
}

/// Parse configuration text.
pub fn parse_config(text: &str, origin: &Path) -> io::Result<CliConfig> {
    toml::from_str(text).map_err(|e| {
        io::Error::new(
            ErrorKind::InvalidData,
            format!("Failed to parse config '{}': {}", origin.display(), e),
        )
    })
}

/// Where to look for the configuration file, and whether the user asked for
/// that location explicitly.
fn config_location(flag: Option<&Path>) -> Option<(PathBuf, bool)> {
    if let Some(path) = flag {
        return Some((path.to_path_buf(), true));
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV)
        && !path.is_empty()
    {
        return Some((PathBuf::from(path), true));
    }
    ProjectDirs::from("", "", "cscope-search")
        .map(|dirs| (dirs.config_dir().join("config.toml"), false))
}

/// Load the configuration: `--config`, then `$CSCOPE_SEARCH_CONFIG`, then the
/// per-user config directory. A missing default file means defaults; a
/// missing explicit file is an error.
pub fn load_cli_config(flag: Option<&Path>) -> io::Result<CliConfig> {
    let Some((path, explicit)) = config_location(flag) else {
        return Ok(CliConfig::default());
    };

    match std::fs::read_to_string(&path) {
        Ok(text) => {
            log::debug!("config: {}", path.display());
            parse_config(&text, &path)
        }
        Err(e) if e.kind() == ErrorKind::NotFound && !explicit => Ok(CliConfig::default()),
        Err(e) => Err(io::Error::new(
            e.kind(),
            format!("Failed to read config '{}': {}", path.display(), e),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cli(s: &str) -> Cli {
        let args: Vec<String> = std::iter::once("cscope-search".to_string())
            .chain(shlex::split(s).unwrap_or_default())
            .collect();
        Cli::parse_from_args(&args).unwrap()
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = parse_config("", Path::new("c.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.prompt, "Search> ");
        assert!(config.use_mmap);
        assert_eq!(config.max_results, 0);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = parse_config("max_results = 3\nshow_marks = true\n", Path::new("c.toml"))
            .unwrap();
        assert_eq!(config.max_results, 3);
        assert!(config.show_marks);
        assert!(config.use_mmap);
        assert_eq!(config.prompt, "Search> ");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = parse_config("colour = true\n", Path::new("c.toml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().contains("c.toml"));
    }

    #[test]
    fn test_flags_override_file() {
        let mut config = parse_config(
            "max_results = 3\nuse_mmap = true\n",
            Path::new("c.toml"),
        )
        .unwrap();
        config.apply_cli(&cli("-n 7 --no-mmap --letter-marks db.out"));
        assert_eq!(config.max_results, 7);
        assert!(!config.use_mmap);
        assert!(config.load_options().letter_marks);
    }

    #[test]
    fn test_absent_flags_leave_file_values() {
        let mut config = parse_config("max_results = 3\n", Path::new("c.toml")).unwrap();
        config.apply_cli(&cli("db.out"));
        assert_eq!(config.max_results, 3);
        assert!(config.use_mmap);
    }

    #[test]
    fn test_explicit_path_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "prompt = \"> \"\n").unwrap();
        let config = load_cli_config(Some(path.as_path())).unwrap();
        assert_eq!(config.prompt, "> ");
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");
        let err = load_cli_config(Some(path.as_path())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
