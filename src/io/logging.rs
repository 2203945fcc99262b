//! Log subscriber installation for the command-line tool
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to binaries. `RUST_LOG` takes precedence over the verbosity flags.

use tracing_subscriber::EnvFilter;

use crate::io::configuration::DEFAULT_LOG_DIRECTIVE;
use crate::io::error::{InferenceError, Result};

/// Filter directive for a `-v` count, or errors only when `quiet`
pub const fn filter_directive(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "gridrule=error";
    }
    match verbosity {
        0 => DEFAULT_LOG_DIRECTIVE,
        1 => "gridrule=info",
        2 => "gridrule=debug",
        _ => "gridrule=trace",
    }
}

/// Install a stderr fmt subscriber
///
/// # Errors
///
/// Returns [`InferenceError::LoggingInit`] if a global subscriber is already set
pub fn init_logging(verbosity: u8, quiet: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity, quiet)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init()
        .map_err(|error| InferenceError::LoggingInit {
            reason: error.to_string(),
        })
}
