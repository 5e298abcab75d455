/// Madlib — interactive terminal story generator.
///
/// Usage: madlib
///
/// Reads templates from `templates/` and saves stories to `saved_stories/`,
/// or the directories named in `madlib.ron` when that file exists.
/// Set RUST_LOG=debug for diagnostic output on stderr.

use anyhow::{Context, Result};
use std::io::{self, BufWriter};
use std::path::Path;

use madlib_engine::core::config::{Config, DEFAULT_CONFIG_FILE};
use madlib_engine::core::terminal::{FlowError, TerminalFlow};

fn setup_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    setup_logging();

    let config = Config::load_or_default(Path::new(DEFAULT_CONFIG_FILE))
        .with_context(|| format!("failed to load {}", DEFAULT_CONFIG_FILE))?;
    log::debug!(
        "templates: {}, saves: {}",
        config.templates_dir.display(),
        config.save_dir.display()
    );

    println!("Welcome to Madlib!");

    let stdin = io::stdin();
    let stdout = BufWriter::new(io::stdout());
    let mut flow = TerminalFlow::new(stdin.lock(), stdout, &config);

    match flow.run() {
        Ok(()) => Ok(()),
        Err(FlowError::InputClosed) => {
            println!("\nGoodbye!");
            Ok(())
        }
        Err(e) => Err(e).context("terminal session failed"),
    }
}
