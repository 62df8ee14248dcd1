//! `log` backend for the simulator.
//!
//! Every record goes to stderr and into a [`LogBuffer`] holding the last few
//! lines, which is printed as a summary when the run ends.

use std::sync::{Mutex, OnceLock};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use status_bar_common::log_buffer::LogBuffer;

pub struct SimLogger {
    level: LevelFilter,
    recent: Mutex<LogBuffer>,
}

static LOGGER: OnceLock<SimLogger> = OnceLock::new();

impl Log for SimLogger {
    fn enabled(
        &self,
        metadata: &Metadata,
    ) -> bool {
        metadata.level() <= self.level
    }

    fn log(
        &self,
        record: &Record,
    ) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("{:<5} {}", record.level(), record.args());
        eprintln!("{line}");
        if let Ok(mut recent) = self.recent.lock() {
            recent.push(&line);
        }
    }

    fn flush(&self) {}
}

/// Install the logger. Fails if another logger is already set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| SimLogger {
        level,
        recent: Mutex::new(LogBuffer::new()),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// The most recent log lines, oldest first.
pub fn recent() -> Vec<String> {
    LOGGER
        .get()
        .and_then(|logger| logger.recent.lock().ok())
        .map(|recent| recent.iter().map(String::from).collect())
        .unwrap_or_default()
}
