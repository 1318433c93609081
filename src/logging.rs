//! Diagnostic logging setup for the command-line tool
//!
//! Library code only emits `tracing` events; the binary decides where they
//! go. Events are written to stderr so they never mix with outline output.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "ESWALK_LOG";

/// Filter used when `ESWALK_LOG` is unset or invalid.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "eswalk=debug" } else { "warn" }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_follows_verbosity() {
        assert_eq!(default_directive(false), "warn");
        assert_eq!(default_directive(true), "eswalk=debug");
    }

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        init_logging(false);
        init_logging(true);
    }
}
