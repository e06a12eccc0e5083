// src/logging.rs
// =============================================================================
// Sets up `tracing` so the rest of the code can use info!/warn!/debug!.
//
// Logs go to stderr. stdout is kept for the usage line, progress and the
// final summary, so `link-harvest ... > run.txt` stays readable.
//
// The filter comes from RUST_LOG when it is set, e.g.
//   RUST_LOG=link_harvest=debug link-harvest -l urls.txt -o links.txt
// =============================================================================

use tracing_subscriber::EnvFilter;

/// Filter used when RUST_LOG is not set
const DEFAULT_FILTER: &str = "warn,link_harvest=info";

pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // try_init instead of init: a second call (e.g. from tests) must not panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
