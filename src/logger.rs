use log::LevelFilter;
use std::io::Write;

/// Level used for presetter's own records.
pub fn level_filter(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes the global logger.
///
/// Dependencies only report warnings; `RUST_LOG` still overrides both levels.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_CRATE_NAME"), level_filter(verbose))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:<5}] {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        })
        .parse_default_env()
        .init();
}
