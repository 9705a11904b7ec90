use core::cell::RefCell;
use core::fmt::Write;

use bonk_hardware::serial::DebugSerialPort;
use cortex_m::interrupt::{self, Mutex};
use heapless::String;
use log::Record;

use super::{level_name, LINE_CAPACITY};

static SERIAL_LOGGER: Mutex<RefCell<Option<DebugSerialPort>>> = Mutex::new(RefCell::new(None));

/// Hands the debug port to the logger. Records logged before this are dropped.
pub fn init(port: DebugSerialPort) {
    interrupt::free(|cs| *SERIAL_LOGGER.borrow(cs).borrow_mut() = Some(port));
}

pub(super) fn log(record: &Record) {
    // Format outside the critical section, the write itself blocks on the UART
    let mut line: String<LINE_CAPACITY> = String::new();
    let _ = write!(line, "{}: {}", level_name(record.level()), record.args());

    interrupt::free(|cs| {
        if let Some(tx) = SERIAL_LOGGER.borrow(cs).borrow_mut().as_mut() {
            // Nowhere left to report a failed log write
            let _ = tx.write_str(&line);
            let _ = tx.write_str("\r\n");
        }
    });
}
