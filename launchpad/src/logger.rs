//! `log` backend printing through semihosting.
//!
//! Semihosting halts the core on every print, so keep the level low in timing
//! sensitive code. Without a debugger attached the first print hangs.

use cortex_m_semihosting::hprintln;
use log::{LevelFilter, Log, Metadata, Record};

struct Semihosting;

static LOGGER: Semihosting = Semihosting;

impl Log for Semihosting {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            hprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the semihosting logger.
///
/// Later calls leave the first logger in place.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
