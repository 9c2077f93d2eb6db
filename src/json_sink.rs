use crate::record::{LogRecord, Severity};
use crate::sink::{CaptureSink, SinkResult, StoreError};
use std::collections::BTreeMap;
use std::error::Error;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

/// Console/file backend: keeps its own contextual store and writes each
/// emitted record as one JSON object per line.
///
/// The store lives in the sink instance, so callers sharing one sink
/// across threads must scope it per request themselves.
pub struct JsonLinesSink<W> {
    name: String,
    fields: Mutex<BTreeMap<String, String>>,
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        JsonLinesSink {
            name: name.into(),
            fields: Mutex::new(BTreeMap::new()),
            writer: Mutex::new(writer),
        }
    }

    /// Consume the sink and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W, StoreError> {
        self.writer.into_inner().map_err(|_| StoreError)
    }

    fn fields(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>, StoreError> {
        self.fields.lock().map_err(|_| StoreError)
    }

    fn emit(&self, level: Severity, message: &str, error: Option<&dyn Error>) -> SinkResult {
        let fields = self.fields()?.clone();
        let record = LogRecord::new(level, &self.name, message, fields, error);
        let mut line = serde_json::to_vec(&record)?;
        line.push(b'\n');

        let mut writer = self.writer.lock().map_err(|_| StoreError)?;
        writer.write_all(&line)?;
        writer.flush()?;
        Ok(())
    }
}

impl JsonLinesSink<io::Stdout> {
    /// Sink writing JSON lines to standard output.
    pub fn stdout(name: impl Into<String>) -> Self {
        JsonLinesSink::new(name, io::stdout())
    }
}

impl<W: Write + Send> CaptureSink for JsonLinesSink<W> {
    fn set_log_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn capture(&self, key: &str, value: &str) -> SinkResult {
        self.fields()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn reset(&self) -> SinkResult {
        self.fields()?.clear();
        Ok(())
    }

    fn info(&self, message: &str) -> SinkResult {
        self.emit(Severity::Info, message, None)
    }

    fn warn(&self, message: &str) -> SinkResult {
        self.emit(Severity::Warn, message, None)
    }

    fn warn_with_error(&self, message: &str, error: &dyn Error) -> SinkResult {
        self.emit(Severity::Warn, message, Some(error))
    }
}
