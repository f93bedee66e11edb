//! Failure reporting for the codec front ends.
//!
//! The primitives never talk to a process-wide logger themselves. Each [`PerWriter`] and
//! [`PerReader`] holds a [`DiagnosticSink`] that is told about every failing operation before
//! the error is handed back to the caller. The returned [`Error`] stays the primary channel.
//!
//! [`PerWriter`]: crate::io::per::PerWriter
//! [`PerReader`]: crate::io::per::PerReader

use crate::io::per::err::{Direction, Error};
use std::sync::Arc;

pub trait DiagnosticSink: Send + Sync {
    fn failure(&self, direction: Direction, operation: &'static str, error: &Error);
}

/// Forwards failures to the `log` facade at debug level.
#[derive(Debug, Default, Copy, Clone)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn failure(&self, direction: Direction, operation: &'static str, error: &Error) {
        log::debug!(
            target: "ranper::per",
            "{} of {} failed: {}",
            direction,
            operation,
            error.kind()
        );
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    #[inline]
    fn failure(&self, _direction: Direction, _operation: &'static str, _error: &Error) {}
}

#[inline]
pub(crate) fn default_sink() -> Arc<dyn DiagnosticSink> {
    Arc::new(LogSink)
}
