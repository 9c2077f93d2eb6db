//! Keys written into the contextual store, and the header names they are
//! read from.

pub const SRC_IP: &str = "src_ip";
pub const SRC_PORT: &str = "src_port";
pub const DEST_IP: &str = "dest_ip";
pub const DEST_PORT: &str = "dest_port";
pub const BYTES_IN: &str = "bytes_in";

pub const HTTP_METHOD: &str = "http_method";
pub const URI_PATH: &str = "uri_path";
pub const URI_QUERY: &str = "uri_query";
pub const URL: &str = "url";
pub const PROTOCOL: &str = "protocol";

pub const DATE: &str = "date";
pub const HTTP_HOST: &str = "http_host";
pub const HTTP_REFERRER: &str = "http_referrer";
pub const HTTP_USER_AGENT: &str = "http_user_agent";
pub const HTTP_CONTENT_TYPE: &str = "http_content_type";
pub const X_FORWARDED_FOR: &str = "x_forwarded_for";
pub const KEEP_ALIVE: &str = "keep_alive";

pub const HTTP_STATUS: &str = "http_status";

/// Key for the configured application identifier.
pub const APPLICATION_ID: &str = "applicationId";

/// Key for the web log event type label.
pub const LOG_EVENT_TYPE: &str = "logEventType";

/// Key for the per-request correlation id.
pub const REQUEST_ID: &str = "WFRequestID";

/// Header carrying an upstream correlation id.
pub const REQUEST_ID_HEADER: &str = "WF-Request-ID";

/// Header-to-field mapping for the plain string headers, in capture order.
pub const STRING_HEADERS: [(&str, &str); 6] = [
    ("Host", HTTP_HOST),
    ("Referer", HTTP_REFERRER),
    ("User-Agent", HTTP_USER_AGENT),
    ("Content-Type", HTTP_CONTENT_TYPE),
    ("X-Forwarded-For", X_FORWARDED_FOR),
    ("Keep-Alive", KEEP_ALIVE),
];
