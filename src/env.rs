//! Environment variable names used to configure the capturer and its
//! backend from a service's environment.
//!
//! These are helpers only; [`CapturerConfig`](crate::config::CapturerConfig)
//! and the sinks can be built without touching the environment.

/// Application identifier captured as `applicationId`.
pub const WEBLOG_APPLICATION_ID_ENV: &str = "WEBLOG_APPLICATION_ID";

/// Label captured as `logEventType` on web log records.
pub const WEBLOG_EVENT_TYPE_ENV: &str = "WEBLOG_EVENT_TYPE";

/// `true`/`false`: keep raw header text when a date, UUID or int parse fails.
pub const WEBLOG_FALLBACK_TO_STRING_ENV: &str = "WEBLOG_FALLBACK_TO_STRING";

/// Zone for rendered timestamps: `local`, an IANA name, or `+HH:MM`.
pub const WEBLOG_TIME_ZONE_ENV: &str = "WEBLOG_TIME_ZONE";

/// Backend spec understood by [`parse_backend`](crate::backend::parse_backend).
pub const WEBLOG_BACKEND_ENV: &str = "WEBLOG_BACKEND";

/// Read an environment variable, treating unset and empty the same way.
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}
