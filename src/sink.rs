use std::error::Error;

/// Error returned by a [`CaptureSink`] when its backend fails.
///
/// The request path never swallows these: they are handed back to the
/// caller of [`RequestLogger`](crate::logger::RequestLogger) as-is.
pub type SinkError = Box<dyn Error + Send + Sync>;

/// Result alias for sink operations.
pub type SinkResult = Result<(), SinkError>;

/// Destination for captured fields and the terminal web log record.
///
/// A sink owns a contextual store (an MDC-style key/value map) that the
/// backend consults whenever it emits a record. Captures only write into
/// that store; `info`/`warn` turn the current store plus a message into
/// one finished record.
///
/// Implementations decide how the store is scoped (thread-local, per
/// instance, ...). The core never resets the store on its own.
pub trait CaptureSink: Send + Sync {
    /// Rebind the sink to a named logger or channel.
    fn set_log_name(&mut self, name: &str);

    /// Store `value` under `key` in the current contextual scope,
    /// replacing any previous value for that key.
    fn capture(&self, key: &str, value: &str) -> SinkResult;

    /// Clear every field from the current contextual scope.
    fn reset(&self) -> SinkResult;

    /// Emit a record at INFO severity.
    fn info(&self, message: &str) -> SinkResult;

    /// Emit a record at WARN severity.
    fn warn(&self, message: &str) -> SinkResult;

    /// Emit a record at WARN severity with `error` attached.
    fn warn_with_error(&self, message: &str, error: &dyn Error) -> SinkResult;
}

impl<T: CaptureSink + ?Sized> CaptureSink for Box<T> {
    fn set_log_name(&mut self, name: &str) {
        (**self).set_log_name(name)
    }

    fn capture(&self, key: &str, value: &str) -> SinkResult {
        (**self).capture(key, value)
    }

    fn reset(&self) -> SinkResult {
        (**self).reset()
    }

    fn info(&self, message: &str) -> SinkResult {
        (**self).info(message)
    }

    fn warn(&self, message: &str) -> SinkResult {
        (**self).warn(message)
    }

    fn warn_with_error(&self, message: &str, error: &dyn Error) -> SinkResult {
        (**self).warn_with_error(message, error)
    }
}

/// Raised by sinks that guard their store with a lock when a previous
/// holder panicked.
#[derive(thiserror::Error, Debug)]
#[error("contextual store lock poisoned")]
pub struct StoreError;
