use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Registry};

/// Configuration of the process-wide `tracing` subscriber that renders
/// records emitted by [`TracingSink`](crate::tracing_sink::TracingSink).
///
/// **Fields**
/// - `default_filter`: `EnvFilter` directives used when `RUST_LOG` is unset.
/// - `json`: render events as JSON objects instead of human-readable lines.
/// - `ansi`: colorize human-readable output.
#[derive(Clone, Debug)]
pub struct TracingConfig {
    pub default_filter: String,
    pub json: bool,
    pub ansi: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            json: false,
            ansi: true,
        }
    }
}

/// Install a global subscriber: a [`Registry`] with an [`EnvFilter`] and a
/// `fmt` layer configured by `config`.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing_with_config(config: TracingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));
    let registry = Registry::default().with(filter);

    // The two fmt layers have different types, so each branch installs its own.
    if config.json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_ansi(config.ansi))
            .try_init()
    }
}

/// Initialize tracing with [`TracingConfig::default`].
pub fn init_tracing() -> Result<(), TryInitError> {
    init_tracing_with_config(TracingConfig::default())
}
