//! Diagnostic logging setup.
//!
//! Engine and CLI events go to stderr through `tracing-subscriber`, filtered
//! by `RUST_LOG` (default `warn`). `--verbose` turns on debug output for the
//! blackjack crates regardless of `RUST_LOG`.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "warn";
pub const VERBOSE_FILTER: &str = "warn,blackjack_engine=debug,blackjack_cli=debug";

pub fn filter_for(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Installs the stderr subscriber; later calls in the same process are no-ops.
pub fn init_logging(verbose: bool) {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_env_filter(filter_for(verbose))
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
