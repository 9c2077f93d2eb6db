use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

/// Severity of an emitted web log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warn,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("INFO"),
            Severity::Warn => f.write_str("WARN"),
        }
    }
}

/// One finished log record: the contextual fields at emission time plus
/// message, severity and an optional rendered error.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: Severity,
    pub logger: String,
    pub message: String,
    pub fields: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LogRecord {
    pub fn new(
        level: Severity,
        logger: &str,
        message: &str,
        fields: BTreeMap<String, String>,
        error: Option<&dyn Error>,
    ) -> Self {
        LogRecord {
            timestamp: Utc::now(),
            level,
            logger: logger.to_string(),
            message: message.to_string(),
            fields,
            error: error.map(render_error),
        }
    }
}

/// Render an error and its `source()` chain as `outer: cause: root`.
pub fn render_error(error: &dyn Error) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
