//! Diagnostic logging to stderr.

use tracing::Level;

/// Maps the `-v` count to a maximum log level.
///
/// Warnings and errors are always shown.
pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global subscriber. Safe to call more than once.
pub fn init_logging(verbose: u8) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level_for_verbosity(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
