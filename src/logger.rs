use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Filters for this crate and the `countwords` binary. Quiet runs keep stderr
/// to warnings so the table dump stays readable; verbose runs surface table
/// growth and chunk counts.
fn filters(verbose: bool) -> Builder {
    let crate_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_CRATE_NAME"), crate_level)
        .filter_module("countwords", crate_level)
        .format_timestamp_millis();
    builder
}

/// Installs the global logger once. `RUST_LOG` overrides the defaults.
pub fn initialize_logger(verbose: bool) {
    INIT.call_once_force(|_| {
        let mut builder = filters(verbose);
        builder.parse_default_env();
        let _ = builder.try_init();
    });
}

#[cfg(test)]
mod tests {
    use log::{Level, Record};

    use super::*;

    fn enabled(verbose: bool, target: &str, level: Level) -> bool {
        let logger = filters(verbose).build();
        logger.matches(&Record::builder().target(target).level(level).build())
    }

    #[test]
    fn quiet_by_default() {
        assert!(!enabled(false, "fnvtable::table", Level::Debug));
        assert!(!enabled(false, "fnvtable::reader", Level::Info));
        assert!(!enabled(false, "countwords", Level::Info));
        assert!(enabled(false, "fnvtable::reader", Level::Warn));
        assert!(enabled(false, "countwords", Level::Error));
    }

    #[test]
    fn verbose_shows_table_growth() {
        assert!(enabled(true, "fnvtable::table", Level::Debug));
        assert!(enabled(true, "fnvtable::reader", Level::Info));
        assert!(!enabled(true, "fnvtable::table", Level::Trace));
        assert!(!enabled(true, "tokio::runtime", Level::Debug));
    }

    #[test]
    fn initializes_once() {
        initialize_logger(false);
        initialize_logger(true);
        log::warn!("logger installed");
    }
}
