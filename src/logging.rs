//! Request-scoped, best-effort logging over a [`LogSink`].

use std::fmt;

use tracing::Level;

use crate::sink::{LogRecord, LogSink};

/// Writes a record and deliberately discards any sink failure.
///
/// Sanitization logging is fire-and-forget: a sink that is full, closed or
/// broken must never fail or block the request being filtered.
pub fn best_effort_log(sink: &dyn LogSink, record: &LogRecord) {
    let _ = sink.write(record);
}

/// A request-scoped logger over a [`LogSink`].
///
/// Every record carries the request id. All writes go through
/// [`best_effort_log`].
pub struct RequestLog<'a> {
    sink: &'a dyn LogSink,
    request_id: &'a str,
}

impl<'a> RequestLog<'a> {
    /// Creates a logger for one request.
    pub fn new(sink: &'a dyn LogSink, request_id: &'a str) -> Self {
        Self { sink, request_id }
    }

    /// Returns the request ID associated with this logger.
    pub fn request_id(&self) -> &str {
        self.request_id
    }

    /// Logs a warning-level message.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::WARN, args);
    }

    /// Logs an info-level message.
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::INFO, args);
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        let record = LogRecord {
            level,
            request_id: self.request_id.to_string(),
            message: args.to_string(),
        };
        best_effort_log(self.sink, &record);
    }
}

impl fmt::Debug for RequestLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestLog")
            .field("request_id", &self.request_id)
            .finish_non_exhaustive()
    }
}
