use crate::sink::{CaptureSink, SinkResult};
use std::error::Error;

/// A sink that drops every capture and every record.
///
/// Lets the capture pipeline run where no logging backend is active,
/// and is handy for tests that only care about control flow.
#[derive(Clone, Debug, Default)]
pub struct NoopSink;

impl CaptureSink for NoopSink {
    fn set_log_name(&mut self, _name: &str) {}

    fn capture(&self, _key: &str, _value: &str) -> SinkResult {
        Ok(())
    }

    fn reset(&self) -> SinkResult {
        Ok(())
    }

    fn info(&self, _message: &str) -> SinkResult {
        Ok(())
    }

    fn warn(&self, _message: &str) -> SinkResult {
        Ok(())
    }

    fn warn_with_error(&self, _message: &str, _error: &dyn Error) -> SinkResult {
        Ok(())
    }
}
