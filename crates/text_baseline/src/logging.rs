//! Diagnostic logging capability.
//!
//! The checker never logs through a global; it is handed a
//! [`DiagnosticLogger`] and only calls it when [`Config::verbose`] is set.
//! Nothing it logs affects the comparison.
//!
//! [`Config::verbose`]: crate::Config::verbose

use tracing::Level;

/// Sink for verbose diagnostics.
pub trait DiagnosticLogger: Send + Sync {
    /// Record a diagnostic message at the given level.
    fn log(&self, level: Level, message: &str);
}

/// Default logger that emits `tracing` events under the `text_baseline` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl DiagnosticLogger for TracingLogger {
    fn log(&self, level: Level, message: &str) {
        // `tracing::event!` needs the level as a constant.
        match level {
            Level::TRACE => tracing::trace!(target: "text_baseline", "{message}"),
            Level::DEBUG => tracing::debug!(target: "text_baseline", "{message}"),
            Level::INFO => tracing::info!(target: "text_baseline", "{message}"),
            Level::WARN => tracing::warn!(target: "text_baseline", "{message}"),
            Level::ERROR => tracing::error!(target: "text_baseline", "{message}"),
        }
    }
}

/// Logger that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl DiagnosticLogger for NullLogger {
    fn log(&self, _level: Level, _message: &str) {}
}

impl<F> DiagnosticLogger for F
where
    F: Fn(Level, &str) + Send + Sync,
{
    fn log(&self, level: Level, message: &str) {
        self(level, message);
    }
}
