use std::io::IsTerminal;

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

/// Warnings always reach stderr; `verbose` adds every collaborator command line.
pub fn init(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .without_time()
        .try_init();
    Ok(())
}
