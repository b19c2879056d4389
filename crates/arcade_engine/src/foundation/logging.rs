//! Logging utilities and structured logging support
//!
//! The engine never reaches for a global logger from inside the scene graph.
//! A [`Logger`] is handed to the [`World`](crate::ecs::World) at construction
//! and every rejected transition is reported through it. [`LogFacade`] routes
//! those reports into the `log` crate, which is what applications normally
//! want after calling [`init`].

use std::cell::RefCell;

pub use log::{debug, error, info, trace, warn, Level};

/// Target used for every message the engine emits through the facade
pub const LOG_TARGET: &str = "arcade_engine";

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with an explicit filter such as `"info"` or
/// `"arcade_engine=debug"`
pub fn init_with_level(filter: &str) {
    // try_init: tests and demos may initialise more than once
    let _ = env_logger::Builder::new().parse_filters(filter).try_init();
}

/// Sink for engine diagnostics
pub trait Logger {
    /// Record a message at the given level
    fn log(&self, level: Level, message: &str);

    /// Record a warning
    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    /// Record a debug message
    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }
}

/// Forwards engine diagnostics to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacade;

impl Logger for LogFacade {
    fn log(&self, level: Level, message: &str) {
        log::log!(target: LOG_TARGET, level, "{}", message);
    }
}

/// Keeps every message in memory
///
/// Handy for tools that surface engine warnings in their own UI.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: RefCell<Vec<(Level, String)>>,
}

impl MemoryLogger {
    /// Create an empty logger
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn records(&self) -> Vec<(Level, String)> {
        self.records.borrow().clone()
    }

    /// Number of warnings recorded so far
    pub fn warning_count(&self) -> usize {
        self.records
            .borrow()
            .iter()
            .filter(|(level, _)| *level == Level::Warn)
            .count()
    }

    /// Drop all recorded messages
    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, message: &str) {
        self.records.borrow_mut().push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_logger_counts_warnings() {
        let logger = MemoryLogger::new();
        logger.warn("first");
        logger.debug("noise");
        logger.warn("second");

        assert_eq!(logger.warning_count(), 2);
        assert_eq!(logger.records().len(), 3);

        logger.clear();
        assert!(logger.records().is_empty());
    }
}
