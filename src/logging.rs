//! Diagnostic logging setup.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter, e.g. `LATA_LOG=lata=debug`.
pub const LOG_ENV: &str = "LATA_LOG";

/// Level used when `LATA_LOG` is unset, from the number of `-v` flags.
#[must_use]
pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Logs go to stderr so they never mix
/// with the menu on stdout. Safe to call more than once.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
