use core::fmt::Write;

use defmt::{debug, error, info, trace, warn};
use defmt_rtt as _;
use heapless::String;
use log::{Level, Record};

use super::LINE_CAPACITY;

pub(super) fn log(record: &Record) {
    let args = record.args();
    let mut line: String<LINE_CAPACITY> = String::new();
    let text = match args.as_str() {
        Some(s) => s,
        None => {
            // A full buffer keeps what fit
            let _ = write!(line, "{}", args);
            line.as_str()
        }
    };

    match record.level() {
        Level::Trace => trace!("{=str}", text),
        Level::Debug => debug!("{=str}", text),
        Level::Info => info!("{=str}", text),
        Level::Warn => warn!("{=str}", text),
        Level::Error => error!("{=str}", text),
    }
}
