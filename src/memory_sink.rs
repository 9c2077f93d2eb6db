use crate::record::{LogRecord, Severity};
use crate::sink::{CaptureSink, SinkResult, StoreError};
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::Mutex;

/// In-memory sink that keeps the current contextual store and every
/// record emitted so far.
///
/// Useful for tests and for embedding the capture pipeline where the
/// caller wants to inspect records instead of shipping them. Records are
/// kept until [`take_records`](Self::take_records) drains them, so a
/// long-lived embedder has to drain periodically.
#[derive(Debug)]
pub struct MemorySink {
    name: String,
    fields: Mutex<BTreeMap<String, String>>,
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new(name: impl Into<String>) -> Self {
        MemorySink {
            name: name.into(),
            fields: Mutex::new(BTreeMap::new()),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Copy of the fields currently in the contextual store.
    pub fn fields(&self) -> Result<BTreeMap<String, String>, StoreError> {
        Ok(self.fields.lock().map_err(|_| StoreError)?.clone())
    }

    /// Value currently stored under `key`.
    pub fn field(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.fields.lock().map_err(|_| StoreError)?.get(key).cloned())
    }

    /// Every record emitted since construction, oldest first.
    pub fn records(&self) -> Result<Vec<LogRecord>, StoreError> {
        Ok(self.records.lock().map_err(|_| StoreError)?.clone())
    }

    /// Remove and return every record emitted so far, oldest first.
    /// The contextual store is left untouched.
    pub fn take_records(&self) -> Result<Vec<LogRecord>, StoreError> {
        Ok(std::mem::take(&mut *self.records.lock().map_err(|_| StoreError)?))
    }

    /// Most recently emitted record.
    pub fn last_record(&self) -> Result<Option<LogRecord>, StoreError> {
        Ok(self.records.lock().map_err(|_| StoreError)?.last().cloned())
    }

    fn emit(&self, level: Severity, message: &str, error: Option<&dyn Error>) -> SinkResult {
        let fields = self.fields()?;
        let record = LogRecord::new(level, &self.name, message, fields, error);
        self.records.lock().map_err(|_| StoreError)?.push(record);
        Ok(())
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        MemorySink::new("weblog")
    }
}

impl CaptureSink for MemorySink {
    fn set_log_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn capture(&self, key: &str, value: &str) -> SinkResult {
        self.fields
            .lock()
            .map_err(|_| StoreError)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn reset(&self) -> SinkResult {
        self.fields.lock().map_err(|_| StoreError)?.clear();
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
