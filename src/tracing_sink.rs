use crate::context;
use crate::record::render_error;
use crate::sink::{CaptureSink, SinkError, SinkResult};
use std::error::Error;

/// `tracing` target used for every web log event.
pub const TARGET: &str = "weblog";

/// Sink that keeps captured fields in the thread-local [`context`] store
/// and emits records as `tracing` events.
///
/// Each event carries the logger name in `logger`, the whole contextual
/// store as a JSON object in `fields`, and for failed requests the
/// rendered error chain in `error`. Formatting and shipping is left to
/// whatever subscriber is installed (see [`crate::init`]).
#[derive(Clone, Debug)]
pub struct TracingSink {
    name: String,
}

impl TracingSink {
    pub fn new(name: impl Into<String>) -> Self {
        TracingSink { name: name.into() }
    }

    /// Logger name attached to emitted events.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn fields_json() -> Result<String, SinkError> {
        Ok(serde_json::to_string(&context::snapshot())?)
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        TracingSink::new(TARGET)
    }
}

impl CaptureSink for TracingSink {
    fn set_log_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn capture(&self, key: &str, value: &str) -> SinkResult {
        context::put(key, value);
        Ok(())
    }

    fn reset(&self) -> SinkResult {
        context::clear();
        Ok(())
    }

    fn info(&self, message: &str) -> SinkResult {
        let fields = Self::fields_json()?;
        tracing::info!(target: TARGET, logger = %self.name, fields = %fields, "{}", message);
        Ok(())
    }

    fn warn(&self, message: &str) -> SinkResult {
        let fields = Self::fields_json()?;
        tracing::warn!(target: TARGET, logger = %self.name, fields = %fields, "{}", message);
        Ok(())
    }

    fn warn_with_error(&self, message: &str, error: &dyn Error) -> SinkResult {
        let fields = Self::fields_json()?;
        let error = render_error(error);
        tracing::warn!(
            target: TARGET,
            logger = %self.name,
            fields = %fields,
            error = %error,
            "{}",
            message
        );
        Ok(())
    }
}
