use std::fs::OpenOptions;
use std::path::PathBuf;

use crate::env::{env_or, WEBLOG_BACKEND_ENV};
use crate::json_sink::JsonLinesSink;
use crate::noop_sink::NoopSink;
use crate::sink::CaptureSink;
use crate::tracing_sink::{TracingSink, TARGET};

/// Supported backend kinds that can be selected from a short spec string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendKind {
    Noop,
    Tracing,
    Stdout,
    File(PathBuf),
}

/// Backend selection plus the logger name the sink starts out with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub log_name: String,
}

impl BackendConfig {
    pub fn new(kind: BackendKind) -> Self {
        BackendConfig { kind, log_name: TARGET.to_string() }
    }

    pub fn with_log_name(mut self, log_name: impl Into<String>) -> Self {
        self.log_name = log_name.into();
        self
    }
}

/// Parse a backend spec.
///
/// Examples:
/// - "noop"
/// - "tracing"
/// - "stdout"
/// - "file:///var/log/app/access.jsonl"
pub fn parse_backend(spec: &str) -> Result<BackendConfig, BackendSpecError> {
    let spec = spec.trim();
    let lower = spec.to_ascii_lowercase();

    let kind = if lower == "noop" || lower == "none" {
        BackendKind::Noop
    } else if lower == "tracing" {
        BackendKind::Tracing
    } else if lower == "stdout" || lower == "console" {
        BackendKind::Stdout
    } else if lower.starts_with("file://") {
        let path = &spec["file://".len()..];
        if path.is_empty() {
            return Err(BackendSpecError::MissingPath);
        }
        BackendKind::File(PathBuf::from(path))
    } else {
        return Err(BackendSpecError::UnknownBackend(spec.to_string()));
    };
    Ok(BackendConfig::new(kind))
}

/// Error type returned when parsing a backend spec.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum BackendSpecError {
    #[error("unknown or unsupported backend: {0}")]
    UnknownBackend(String),

    #[error("file backend requires a path")]
    MissingPath,
}

/// Error type returned when building a sink from configuration.
#[derive(thiserror::Error, Debug)]
pub enum BackendBuildError {
    #[error(transparent)]
    Spec(#[from] BackendSpecError),

    #[error("cannot open log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Create a concrete [`CaptureSink`] from a [`BackendConfig`].
///
/// This is the main entry point for services that pick their backend from
/// configuration instead of constructing sinks manually.
pub fn make_sink(cfg: &BackendConfig) -> Result<Box<dyn CaptureSink>, BackendBuildError> {
    let name = cfg.log_name.as_str();
    let sink: Box<dyn CaptureSink> = match &cfg.kind {
        BackendKind::Noop => Box::new(NoopSink),
        BackendKind::Tracing => Box::new(TracingSink::new(name)),
        BackendKind::Stdout => Box::new(JsonLinesSink::stdout(name)),
        BackendKind::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| BackendBuildError::OpenFile { path: path.clone(), source })?;
            Box::new(JsonLinesSink::new(name, file))
        }
    };
    Ok(sink)
}

/// Build the sink named by `WEBLOG_BACKEND`, defaulting to `tracing`.
pub fn backend_from_env() -> Result<Box<dyn CaptureSink>, BackendBuildError> {
    let cfg = parse_backend(&env_or(WEBLOG_BACKEND_ENV, "tracing"))?;
    make_sink(&cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_specs() {
        assert_eq!(parse_backend("noop").unwrap().kind, BackendKind::Noop);
        assert_eq!(parse_backend(" Tracing ").unwrap().kind, BackendKind::Tracing);
        assert_eq!(parse_backend("console").unwrap().kind, BackendKind::Stdout);
        assert_eq!(
            parse_backend("file:///tmp/Access.jsonl").unwrap().kind,
            BackendKind::File(PathBuf::from("/tmp/Access.jsonl"))
        );
    }

    #[test]
    fn rejects_unknown_and_pathless_specs() {
        assert_eq!(
            parse_backend("kafka://broker/topic"),
            Err(BackendSpecError::UnknownBackend("kafka://broker/topic".to_string()))
        );
        assert_eq!(parse_backend("file://"), Err(BackendSpecError::MissingPath));
    }

    #[test]
    fn file_backend_appends_json_lines() {
        let path = std::env::temp_dir().join(format!("weblog-{}.jsonl", uuid::Uuid::new_v4()));
        let cfg = BackendConfig::new(BackendKind::File(path.clone())).with_log_name("access");

        let sink = make_sink(&cfg).unwrap();
        sink.capture("http_status", "204").unwrap();
        sink.info("").unwrap();
        drop(sink);

        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let record: serde_json::Value = serde_json::from_str(written.trim()).unwrap();
        assert_eq!(record["logger"], "access");
        assert_eq!(record["fields"]["http_status"], "204");
    }

    #[test]
    fn unopenable_file_is_reported() {
        let cfg = BackendConfig::new(BackendKind::File(PathBuf::from("/nonexistent-dir/x/y.jsonl")));
        assert!(matches!(make_sink(&cfg), Err(BackendBuildError::OpenFile { .. })));
    }
}
