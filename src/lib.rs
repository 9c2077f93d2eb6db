pub mod config;
pub mod fields;
pub mod parse;
pub mod snapshot;
pub mod extract;
pub mod logger;

pub mod record;
pub mod sink;
pub mod noop_sink;
pub mod memory_sink;
pub mod json_sink;
pub mod context;
pub mod tracing_sink;

pub mod backend;
pub mod env;
pub mod init;

pub use config::{CaptureZone, CapturerConfig};
pub use logger::RequestLogger;
pub use sink::{CaptureSink, SinkError};
