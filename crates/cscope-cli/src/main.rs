// cscope-search: CLI frontend for cscope-core
// Argument parsing, config, file loading, query loop

mod cli;
mod config;
mod output;
mod session;
mod source;

use cli::{Cli, Mode};
use config::load_cli_config;
use cscope_core::{Database, build_index};
use output::OutputHandler;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

fn init_logging(cli: &Cli) {
    let env = env_logger::Env::default().filter_or("RUST_LOG", cli.log_filter());
    env_logger::Builder::from_env(env).init();
}

fn run() -> io::Result<ExitCode> {
    let cli = Cli::parse_args()?;
    init_logging(&cli);

    let mut config = load_cli_config(cli.config.as_deref())?;
    config.apply_cli(&cli);

    let db = {
        let bytes = source::open_database(&cli.database, config.use_mmap)?;
        Database::load_with(
            cli.database.display().to_string(),
            &bytes,
            &config.load_options(),
        )
    };

    let output = OutputHandler::new(&config);
    output.diagnostics(&db);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.mode() {
        Mode::Dump => {
            db.dump(&mut out)?;
        }
        Mode::OneShot(queries) => {
            let index = build_index(&db);
            if !session::run_queries(&index, &queries, &mut out, &output)? {
                out.flush()?;
                return Ok(ExitCode::FAILURE);
            }
        }
        Mode::Interactive => {
            writeln!(out, "{}", db)?;
            let index = build_index(&db);
            let stdin = io::stdin();
            let prompt = stdin.is_terminal().then_some(config.prompt.as_str());
            session::run_interactive(&index, stdin.lock(), &mut out, &output, prompt)?;
        }
    }

    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            ExitCode::FAILURE
        }
    }
}
