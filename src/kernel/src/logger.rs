//! `log` backend writing to the serial port.
//!
//! Lines look like `[INFO ] turban_kernel::reset: message`.

use crate::config::KernelConfig;
use crate::serial_println;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Serial-backed kernel logger.
pub struct KernelLogger {
    level: LevelFilter,
}

static LOGGER: KernelLogger = KernelLogger {
    level: KernelConfig::log_level(),
};

impl Log for KernelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            serial_println!("[{:<5}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Installs the logger. Fails if a logger is already set.
pub fn init() -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(LOGGER.level);
    Ok(())
}
