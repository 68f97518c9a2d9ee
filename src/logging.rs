//! Logger set-up shared by the demo binary and tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initialises the global logger.
///
/// `verbose` lowers the default filter from info to debug. `RUST_LOG`
/// overrides either default.
pub fn init(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let installed = Builder::from_env(Env::default().default_filter_or(default_level.to_string()))
        .format_timestamp_millis()
        .format_target(verbose)
        .try_init();

    // Repeated test set-up installs a logger more than once.
    if installed.is_err() {
        log::trace!("logger already initialised");
    }
}
