//! Fans `log` records out to whichever back ends the build enabled.
#[cfg(feature = "defmt_logger")]
pub mod defmt_logger;

#[cfg(feature = "serial_logger")]
pub mod serial_logger;

pub use log::Level;
use log::{Metadata, Record};

/// Longest line a back end formats, the rest is cut off
pub(crate) const LINE_CAPACITY: usize = 128;

struct LoggerType;

static LOGGER: LoggerType = LoggerType;

/// Installs the dispatcher. A second call only changes the level.
pub fn init(level: Level) {
    if log::set_logger(&LOGGER).is_err() {
        log::warn!("logger already installed");
    }
    log::set_max_level(level.to_level_filter());
}

pub(crate) fn level_name(level: Level) -> &'static str {
    match level {
        Level::Trace => "trace",
        Level::Debug => "debug",
        Level::Info => "info",
        Level::Warn => "warn",
        Level::Error => "error",
    }
}

impl log::Log for LoggerType {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            #[cfg(feature = "defmt_logger")]
            defmt_logger::log(record);

            #[cfg(feature = "serial_logger")]
            serial_logger::log(record);
        }
    }

    fn flush(&self) {}
}
