use crate::env::{
    env_opt, WEBLOG_APPLICATION_ID_ENV, WEBLOG_EVENT_TYPE_ENV, WEBLOG_FALLBACK_TO_STRING_ENV,
    WEBLOG_TIME_ZONE_ENV,
};
use chrono::{DateTime, Datelike, FixedOffset, Local, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

/// Rendering for captured timestamps: RFC 3339 with exactly three
/// fractional digits and a numeric offset (`+00:00`, never `Z`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// Event type captured as `logEventType` when none is configured.
pub const DEFAULT_WEB_LOG_EVENT_TYPE: &str = "web";

/// Error type returned when building a [`CapturerConfig`] from strings.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("invalid boolean for {key}: {value}")]
    InvalidBool { key: String, value: String },
}

/// Time zone that captured timestamps are normalized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureZone {
    /// The process's local zone.
    #[default]
    Local,
    /// A named IANA zone, e.g. `Europe/Paris`.
    Named(Tz),
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl CaptureZone {
    /// Convert `instant` into this zone and render it with [`TIMESTAMP_FORMAT`].
    ///
    /// Returns `None` when the zoned year falls outside `0..=9999`, since
    /// `%Y` would then no longer be four digits wide.
    pub fn format(&self, instant: DateTime<Utc>) -> Option<String> {
        match self {
            CaptureZone::Local => render(instant.with_timezone(&Local)),
            CaptureZone::Named(tz) => render(instant.with_timezone(tz)),
            CaptureZone::Fixed(offset) => render(instant.with_timezone(offset)),
        }
    }
}

fn render<Z>(zoned: DateTime<Z>) -> Option<String>
where
    Z: TimeZone,
    Z::Offset: fmt::Display,
{
    (0..=9999)
        .contains(&zoned.year())
        .then(|| zoned.format(TIMESTAMP_FORMAT).to_string())
}

impl FromStr for CaptureZone {
    type Err = ConfigError;

    /// Accepts `local`/`system`, an IANA zone name, or an offset like `+05:30`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let zone = s.trim();
        if zone.eq_ignore_ascii_case("local") || zone.eq_ignore_ascii_case("system") {
            return Ok(CaptureZone::Local);
        }

        let parsed = if zone.starts_with('+') || zone.starts_with('-') {
            zone.parse::<FixedOffset>().ok().map(CaptureZone::Fixed)
        } else {
            zone.parse::<Tz>().ok().map(CaptureZone::Named)
        };
        parsed.ok_or_else(|| ConfigError::UnknownTimeZone(s.to_string()))
    }
}

impl fmt::Display for CaptureZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureZone::Local => f.write_str("local"),
            CaptureZone::Named(tz) => f.write_str(tz.name()),
            CaptureZone::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

/// Per-logger capture configuration.
///
/// Built once and treated as immutable; use the `with_*` methods to derive
/// an updated copy.
///
/// **Fields**
/// - `application_id`: captured as `applicationId` by
///   [`capture_log_context`](crate::logger::RequestLogger::capture_log_context)
///   when set and non-empty.
/// - `web_log_event_type`: label captured as `logEventType`; `"web"` when unset.
/// - `fallback_to_string`: keep the raw header text when a date, UUID or
///   integer parse fails instead of dropping the field.
/// - `time_zone`: zone that captured timestamps are rendered in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturerConfig {
    pub application_id: Option<String>,
    pub web_log_event_type: Option<String>,
    pub fallback_to_string: bool,
    pub time_zone: CaptureZone,
}

impl CapturerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_application_id(mut self, application_id: impl Into<String>) -> Self {
        self.application_id = Some(application_id.into());
        self
    }

    pub fn with_web_log_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.web_log_event_type = Some(event_type.into());
        self
    }

    pub fn with_fallback_to_string(mut self, fallback_to_string: bool) -> Self {
        self.fallback_to_string = fallback_to_string;
        self
    }

    pub fn with_time_zone(mut self, time_zone: CaptureZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Label captured as `logEventType`.
    pub fn web_log_event_type(&self) -> &str {
        self.web_log_event_type
            .as_deref()
            .unwrap_or(DEFAULT_WEB_LOG_EVENT_TYPE)
    }

    /// Whether an event type was configured explicitly.
    pub fn is_web_logging(&self) -> bool {
        self.web_log_event_type.is_some()
    }

    /// Build a configuration from the `WEBLOG_*` environment variables.
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_opt)
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CapturerConfig {
            application_id: lookup(WEBLOG_APPLICATION_ID_ENV),
            web_log_event_type: lookup(WEBLOG_EVENT_TYPE_ENV),
            ..Self::default()
        };

        if let Some(raw) = lookup(WEBLOG_FALLBACK_TO_STRING_ENV) {
            config.fallback_to_string = parse_bool(WEBLOG_FALLBACK_TO_STRING_ENV, &raw)?;
        }
        if let Some(raw) = lookup(WEBLOG_TIME_ZONE_ENV) {
            config.time_zone = raw.parse()?;
        }
        Ok(config)
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn utc_renders_numeric_offset() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
        let zone: CaptureZone = "UTC".parse().unwrap();
        assert_eq!(
            zone.format(instant).as_deref(),
            Some("2024-03-01T12:30:05.000+00:00")
        );
    }

    #[test]
    fn named_and_fixed_zones_shift_wall_clock() {
        let instant = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();

        let tokyo: CaptureZone = "Asia/Tokyo".parse().unwrap();
        assert_eq!(
            tokyo.format(instant).as_deref(),
            Some("2023-11-15T07:13:20.123+09:00")
        );

        let india: CaptureZone = "+05:30".parse().unwrap();
        assert_eq!(
            india.format(instant).as_deref(),
            Some("2023-11-15T03:43:20.123+05:30")
        );
    }

    #[test]
    fn year_pushed_past_9999_by_zone_is_not_rendered() {
        let instant = Utc.with_ymd_and_hms(9999, 12, 31, 23, 0, 0).unwrap();

        let kiritimati = CaptureZone::Named(chrono_tz::Pacific::Kiritimati);
        assert_eq!(kiritimati.format(instant), None);

        let honolulu = CaptureZone::Named(chrono_tz::Pacific::Honolulu);
        assert_eq!(
            honolulu.format(instant).as_deref(),
            Some("9999-12-31T13:00:00.000-10:00")
        );
    }

    #[test]
    fn zone_parsing_accepts_local_and_rejects_garbage() {
        assert_eq!("system".parse::<CaptureZone>(), Ok(CaptureZone::Local));
        assert_eq!("Local".parse::<CaptureZone>(), Ok(CaptureZone::Local));
        assert_eq!(
            "Mars/Olympus".parse::<CaptureZone>(),
            Err(ConfigError::UnknownTimeZone("Mars/Olympus".to_string()))
        );
    }

    #[test]
    fn event_type_defaults_to_web() {
        let config = CapturerConfig::new();
        assert_eq!(config.web_log_event_type(), "web");
        assert!(!config.is_web_logging());

        let config = config.with_web_log_event_type("access");
        assert_eq!(config.web_log_event_type(), "access");
        assert!(config.is_web_logging());
    }

    #[test]
    fn from_lookup_reads_all_keys() {
        let vars: HashMap<&str, &str> = [
            (WEBLOG_APPLICATION_ID_ENV, "billing"),
            (WEBLOG_EVENT_TYPE_ENV, "access"),
            (WEBLOG_FALLBACK_TO_STRING_ENV, "TRUE"),
            (WEBLOG_TIME_ZONE_ENV, "Europe/Paris"),
        ]
        .into_iter()
        .collect();

        let config =
            CapturerConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.application_id.as_deref(), Some("billing"));
        assert_eq!(config.web_log_event_type(), "access");
        assert!(config.fallback_to_string);
        assert_eq!(config.time_zone, CaptureZone::Named(chrono_tz::Europe::Paris));
    }

    #[test]
    fn from_lookup_rejects_bad_bool() {
        let err = CapturerConfig::from_lookup(|key| {
            (key == WEBLOG_FALLBACK_TO_STRING_ENV).then(|| "maybe".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBool { .. }));
    }
}
