//! Capture passes that copy request and response attributes into a sink.
//!
//! Every pass writes straight into the sink; the key sets of the passes
//! are disjoint so their order never matters for the final store.

use crate::config::CapturerConfig;
use crate::fields;
use crate::parse::from_date;
use crate::sink::{CaptureSink, SinkResult};
use crate::snapshot::{HttpRequestView, RequestView, ResponseView};

/// Capture the network fields of any request.
///
/// `bytes_in` is skipped when the content length is unknown (negative).
pub fn capture_connection<S>(sink: &S, request: &dyn RequestView) -> SinkResult
where
    S: CaptureSink + ?Sized,
{
    let remote = request.remote_addr();
    let local = request.local_addr();
    sink.capture(fields::SRC_IP, &remote.ip().to_string())?;
    sink.capture(fields::SRC_PORT, &remote.port().to_string())?;
    sink.capture(fields::DEST_IP, &local.ip().to_string())?;
    sink.capture(fields::DEST_PORT, &local.port().to_string())?;

    let bytes_in = request.content_length();
    if bytes_in >= 0 {
        sink.capture(fields::BYTES_IN, &bytes_in.to_string())?;
    }
    Ok(())
}

/// Capture method, path, query, URL and protocol of an HTTP request.
pub fn capture_http_request<S>(sink: &S, request: &dyn HttpRequestView) -> SinkResult
where
    S: CaptureSink + ?Sized,
{
    sink.capture(fields::HTTP_METHOD, request.method())?;

    let uri_path = format!(
        "{}{}",
        request.servlet_path().unwrap_or_default(),
        request.path_info().unwrap_or_default()
    );
    capture_if_present(sink, fields::URI_PATH, Some(&uri_path))?;
    capture_if_present(sink, fields::URI_QUERY, request.query_string())?;

    sink.capture(fields::URL, &request.request_url())?;
    sink.capture(fields::PROTOCOL, request.protocol())
}

/// Capture the `Date` header as a normalized timestamp and the plain
/// string headers, each only when present and non-empty.
pub fn capture_headers<S>(
    sink: &S,
    request: &dyn HttpRequestView,
    config: &CapturerConfig,
) -> SinkResult
where
    S: CaptureSink + ?Sized,
{
    let date = from_date(request, "Date", config.fallback_to_string, &config.time_zone);
    capture_if_present(sink, fields::DATE, date.as_deref())?;

    for (header, key) in fields::STRING_HEADERS {
        capture_if_present(sink, key, request.header(header).as_deref())?;
    }
    Ok(())
}

/// Capture the HTTP status of the response, if it has one.
pub fn capture_http_response<S>(sink: &S, response: &dyn ResponseView) -> SinkResult
where
    S: CaptureSink + ?Sized,
{
    match response.status() {
        Some(status) => sink.capture(fields::HTTP_STATUS, &status.to_string()),
        None => Ok(()),
    }
}

/// Run every applicable pass: network fields always, request, header and
/// response fields only for HTTP requests.
pub fn capture_web_log<S>(
    sink: &S,
    request: &dyn RequestView,
    response: &dyn ResponseView,
    config: &CapturerConfig,
) -> SinkResult
where
    S: CaptureSink + ?Sized,
{
    capture_connection(sink, request)?;
    if let Some(http) = request.as_http() {
        capture_http_request(sink, http)?;
        capture_headers(sink, http, config)?;
        capture_http_response(sink, response)?;
    }
    Ok(())
}

/// Capture `value` only when it is present and non-empty.
pub(crate) fn capture_if_present<S>(sink: &S, key: &str, value: Option<&str>) -> SinkResult
where
    S: CaptureSink + ?Sized,
{
    match value {
        Some(value) if !value.is_empty() => sink.capture(key, value),
        _ => Ok(()),
    }
}
