//! Read-only views of the inbound request and outbound response.
//!
//! The capture code only talks to [`RequestView`], [`HttpRequestView`] and
//! [`ResponseView`]. [`HttpRequestSnapshot`] and [`ConnectionSnapshot`] are
//! ready-made implementations built from `http` crate types and socket
//! addresses.

use chrono::{DateTime, NaiveDateTime};
use http::header::{CONTENT_LENGTH, HOST};
use http::{HeaderMap, HeaderValue, Method, Request, Response, StatusCode, Version};
use std::borrow::Cow;
use std::net::SocketAddr;
use std::num::ParseIntError;

/// Content length reported when the body size is not known up front.
pub const UNKNOWN_CONTENT_LENGTH: i64 = -1;

/// Network-level view shared by every request, HTTP or not.
pub trait RequestView {
    fn remote_addr(&self) -> SocketAddr;

    fn local_addr(&self) -> SocketAddr;

    /// Body length in bytes; negative when unknown.
    fn content_length(&self) -> i64;

    /// HTTP-specific view, if this request is an HTTP request.
    fn as_http(&self) -> Option<&dyn HttpRequestView> {
        None
    }
}

/// HTTP request accessors. Header lookup must be case-insensitive.
pub trait HttpRequestView: RequestView {
    fn method(&self) -> &str;

    /// Path prefix routed to the handling application, if any.
    fn servlet_path(&self) -> Option<&str>;

    /// Remainder of the path after [`servlet_path`](Self::servlet_path).
    fn path_info(&self) -> Option<&str>;

    fn query_string(&self) -> Option<&str>;

    /// Reconstructed request URL without the query string.
    fn request_url(&self) -> String;

    /// Protocol version as sent on the wire, e.g. `HTTP/1.1`.
    fn protocol(&self) -> &str;

    /// Header value as text. Values carrying non-ASCII bytes are still
    /// returned, decoded rather than dropped.
    fn header(&self, name: &str) -> Option<Cow<'_, str>>;

    /// Header interpreted as an HTTP-date, in milliseconds since the epoch.
    fn date_header(&self, name: &str) -> Option<i64> {
        self.header(name).and_then(|raw| parse_http_date(&raw))
    }

    /// Header interpreted as a base-10 integer.
    fn int_header(&self, name: &str) -> Option<Result<i64, ParseIntError>> {
        self.header(name).map(|raw| raw.parse())
    }
}

/// Response view; `None` for transports without an HTTP status.
pub trait ResponseView {
    fn status(&self) -> Option<u16>;
}

impl ResponseView for StatusCode {
    fn status(&self) -> Option<u16> {
        Some(self.as_u16())
    }
}

impl<B> ResponseView for Response<B> {
    fn status(&self) -> Option<u16> {
        Some(self.status().as_u16())
    }
}

/// Response of a non-HTTP exchange.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericResponse;

impl ResponseView for GenericResponse {
    fn status(&self) -> Option<u16> {
        None
    }
}

/// Parse the three HTTP-date forms (IMF-fixdate, RFC 850, asctime) into
/// milliseconds since the epoch.
pub fn parse_http_date(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
        return Some(date.timestamp_millis());
    }
    ["%A, %d-%b-%y %H:%M:%S GMT", "%a %b %e %H:%M:%S %Y"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc().timestamp_millis())
}

fn version_str(version: Version) -> &'static str {
    if version == Version::HTTP_09 {
        "HTTP/0.9"
    } else if version == Version::HTTP_10 {
        "HTTP/1.0"
    } else if version == Version::HTTP_2 {
        "HTTP/2.0"
    } else if version == Version::HTTP_3 {
        "HTTP/3.0"
    } else {
        "HTTP/1.1"
    }
}

/// Network-only request, for transports that are not HTTP.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionSnapshot {
    pub remote: SocketAddr,
    pub local: SocketAddr,
    pub content_length: i64,
}

impl ConnectionSnapshot {
    pub fn new(remote: SocketAddr, local: SocketAddr) -> Self {
        ConnectionSnapshot { remote, local, content_length: UNKNOWN_CONTENT_LENGTH }
    }

    pub fn with_content_length(mut self, content_length: i64) -> Self {
        self.content_length = content_length;
        self
    }
}

impl RequestView for ConnectionSnapshot {
    fn remote_addr(&self) -> SocketAddr {
        self.remote
    }

    fn local_addr(&self) -> SocketAddr {
        self.local
    }

    fn content_length(&self) -> i64 {
        self.content_length
    }
}

/// Owned snapshot of an HTTP request head plus its connection addresses.
#[derive(Debug, Clone)]
pub struct HttpRequestSnapshot {
    remote: SocketAddr,
    local: SocketAddr,
    method: Method,
    servlet_path: Option<String>,
    path_info: Option<String>,
    query: Option<String>,
    url: String,
    version: Version,
    headers: HeaderMap,
    content_length: i64,
}

impl HttpRequestSnapshot {
    /// Snapshot the head of `request` as received on `local` from `remote`.
    ///
    /// The whole URI path becomes the servlet path, the content length comes
    /// from the `Content-Length` header, and the URL is rebuilt from the URI
    /// authority, the `Host` header, or the local address, whichever is
    /// available first.
    pub fn from_request<B>(request: &Request<B>, remote: SocketAddr, local: SocketAddr) -> Self {
        let uri = request.uri();
        let headers = request.headers().clone();

        let content_length = headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|len| *len >= 0)
            .unwrap_or(UNKNOWN_CONTENT_LENGTH);

        let scheme = uri.scheme_str().unwrap_or("http");
        let authority = uri
            .authority()
            .map(|a| a.as_str().to_string())
            .or_else(|| headers.get(HOST).map(|v| decode_header(v).into_owned()))
            .unwrap_or_else(|| local.to_string());
        let url = format!("{}://{}{}", scheme, authority, uri.path());

        HttpRequestSnapshot {
            remote,
            local,
            method: request.method().clone(),
            servlet_path: Some(uri.path().to_string()).filter(|p| !p.is_empty()),
            path_info: None,
            query: uri.query().map(String::from),
            url,
            version: request.version(),
            headers,
            content_length,
        }
    }

    /// Split the path into an application prefix and the remaining path info.
    pub fn with_servlet_path(
        mut self,
        servlet_path: Option<String>,
        path_info: Option<String>,
    ) -> Self {
        self.servlet_path = servlet_path;
        self.path_info = path_info;
        self
    }

    pub fn with_content_length(mut self, content_length: i64) -> Self {
        self.content_length = content_length;
        self
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl RequestView for HttpRequestSnapshot {
    fn remote_addr(&self) -> SocketAddr {
        self.remote
    }

    fn local_addr(&self) -> SocketAddr {
        self.local
    }

    fn content_length(&self) -> i64 {
        self.content_length
    }

    fn as_http(&self) -> Option<&dyn HttpRequestView> {
        Some(self)
    }
}

impl HttpRequestView for HttpRequestSnapshot {
    fn method(&self) -> &str {
        self.method.as_str()
    }

    fn servlet_path(&self) -> Option<&str> {
        self.servlet_path.as_deref()
    }

    fn path_info(&self) -> Option<&str> {
        self.path_info.as_deref()
    }

    fn query_string(&self) -> Option<&str> {
        self.query.as_deref()
    }

    fn request_url(&self) -> String {
        self.url.clone()
    }

    fn protocol(&self) -> &str {
        version_str(self.version)
    }

    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        self.headers.get(name).map(decode_header)
    }
}

/// Text of a header value: UTF-8 when the bytes form valid UTF-8, otherwise
/// ISO-8859-1 so that obs-text bytes map one-to-one onto chars.
fn decode_header(value: &HeaderValue) -> Cow<'_, str> {
    let bytes = value.as_bytes();
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}
