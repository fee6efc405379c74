use std::fmt;
use std::sync::Mutex;

use tracing::Level;

/// Error returned when a log sink fails to accept a record.
///
/// The filter never propagates these; see
/// [`best_effort_log`](crate::logging::best_effort_log).
///
/// # Examples
///
/// ```
/// use request_guard::{SinkError, SinkErrorKind};
///
/// let error = SinkError::new(SinkErrorKind::Full);
/// assert_eq!(error.kind(), SinkErrorKind::Full);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkError {
    kind: SinkErrorKind,
    message: Option<String>,
}

impl SinkError {
    /// Creates a new sink error with the specified kind.
    pub fn new(kind: SinkErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Creates a new sink error with a custom message.
    pub fn with_message(kind: SinkErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> SinkErrorKind {
        self.kind
    }

    /// Returns the error message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(msg) = &self.message {
            write!(f, "sink error ({}): {}", self.kind, msg)
        } else {
            write!(f, "sink error ({})", self.kind)
        }
    }
}

impl std::error::Error for SinkError {}

/// Kind of sink error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkErrorKind {
    /// The sink no longer accepts records.
    Closed,
    /// I/O error occurred while writing.
    Io,
    /// Sink is full or has reached capacity.
    Full,
}

impl fmt::Display for SinkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "sink closed"),
            Self::Io => write!(f, "I/O error"),
            Self::Full => write!(f, "sink full"),
        }
    }
}

/// One record handed to a [`LogSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Severity of the record
    pub level: Level,
    /// Request the record belongs to
    pub request_id: String,
    /// Formatted message
    pub message: String,
}

/// Destination for sanitization log records.
///
/// Sinks are shared by every request that passes through a
/// [`RequestFilter`](crate::RequestFilter), so they must be `Send + Sync`.
/// Implementations report failures through `SinkError`; callers inside this
/// crate ignore them.
///
/// # Examples
///
/// ```
/// use request_guard::{LogRecord, LogSink, SinkError};
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// struct CountingSink(AtomicUsize);
///
/// impl LogSink for CountingSink {
///     fn write(&self, _record: &LogRecord) -> Result<(), SinkError> {
///         self.0.fetch_add(1, Ordering::Relaxed);
///         Ok(())
///     }
/// }
/// ```
pub trait LogSink: Send + Sync {
    /// Writes a single record.
    ///
    /// # Errors
    ///
    /// Returns `SinkError` if the record could not be written.
    fn write(&self, record: &LogRecord) -> Result<(), SinkError>;
}

impl<S: LogSink + ?Sized> LogSink for std::sync::Arc<S> {
    fn write(&self, record: &LogRecord) -> Result<(), SinkError> {
        (**self).write(record)
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn write(&self, record: &LogRecord) -> Result<(), SinkError> {
        (**self).write(record)
    }
}

/// Sink that forwards records to `tracing` with a `request_id` field.
///
/// This is the default sink. It never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, record: &LogRecord) -> Result<(), SinkError> {
        let request_id = record.request_id.as_str();
        let message = record.message.as_str();
        match record.level {
            Level::ERROR => tracing::error!(request_id = %request_id, "{}", message),
            Level::WARN => tracing::warn!(request_id = %request_id, "{}", message),
            Level::INFO => tracing::info!(request_id = %request_id, "{}", message),
            Level::DEBUG => tracing::debug!(request_id = %request_id, "{}", message),
            _ => tracing::trace!(request_id = %request_id, "{}", message),
        }
        Ok(())
    }
}

/// Sink that keeps records in memory.
///
/// Useful in tests and for surfacing sanitization events to diagnostics
/// endpoints. An optional capacity makes the sink reject records once full.
///
/// # Examples
///
/// ```
/// use request_guard::{LogRecord, LogSink, MemorySink};
/// use tracing::Level;
///
/// let sink = MemorySink::new();
/// sink.write(&LogRecord {
///     level: Level::WARN,
///     request_id: "req-1".to_string(),
///     message: "Sanitised GET - keys: #markup".to_string(),
/// })
/// .unwrap();
///
/// assert_eq!(sink.len(), 1);
/// assert_eq!(sink.messages(), vec!["Sanitised GET - keys: #markup"]);
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
    capacity: Option<usize>,
}

impl MemorySink {
    /// Creates an unbounded sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that holds at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Mutex::new(Vec::with_capacity(capacity)),
            capacity: Some(capacity),
        }
    }

    /// Returns a snapshot of all records.
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Returns the messages of all records, in write order.
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|r| r.message.clone()).collect()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Removes all records.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogRecord>> {
        // A panic while holding the lock cannot leave a half-written record.
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogSink for MemorySink {
    fn write(&self, record: &LogRecord) -> Result<(), SinkError> {
        let mut records = self.lock();
        if self.capacity.is_some_and(|cap| records.len() >= cap) {
            return Err(SinkError::with_message(
                SinkErrorKind::Full,
                format!("capacity of {} records reached", records.len()),
            ));
        }
        records.push(record.clone());
        Ok(())
    }
}
