use log::LevelFilter;
use std::env;

/// Initialize logging to stderr.
///
/// `Info` by default, `Debug` when `verbose` is set. An explicit `RUST_LOG`
/// overrides both.
pub fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    // A second init (e.g. from tests) keeps the first logger.
    let _ = builder.try_init();
    log::debug!("Logger initialized at {:?} level", level);
}
