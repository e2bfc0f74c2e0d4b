// src/logging.rs
// =============================================================================
// Sets up `tracing` output for the CLI.
//
// Logs go to stderr so the crawl report (especially --json) stays clean on
// stdout. Verbosity:
//   -q      errors only
//   default warnings and the info-level crawl summary
//   -v      per-page debug lines
//   -vv     everything (trace)
// =============================================================================

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

// Picks the max log level from the -v / -q flags
pub fn level_for(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

// Installs the global subscriber; call once at startup
pub fn init(verbose: u8, quiet: bool) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level_for(verbose, quiet))
        .with_target(false)
        .with_thread_names(verbose > 1)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
