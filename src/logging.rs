// src/logging.rs
// =============================================================================
// Logging setup.
//
// Logs go to stderr so stdout stays clean for the report (and for --json).
// RUST_LOG wins when set; otherwise we log at info, or debug with --verbose.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "info,site_mirror=debug"
    } else {
        "info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
