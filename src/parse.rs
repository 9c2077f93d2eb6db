//! Permissive parsers for header values.
//!
//! Headers are client-controlled text, so none of these ever fail loudly:
//! a value either normalizes, falls back to the raw text when
//! `fallback_to_string` is set, or is reported as absent.

use crate::config::CaptureZone;
use crate::snapshot::HttpRequestView;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

/// Length of the hyphenated 8-4-4-4-12 UUID form.
const CANONICAL_UUID_LEN: usize = 36;

/// Read `header` as a timestamp rendered in `zone`.
///
/// The transport's HTTP-date conversion is tried first, then an RFC 3339
/// zoned date-time (optionally suffixed with `[Region/Zone]`). An instant
/// whose year in `zone` cannot be rendered counts as a failed parse.
pub fn from_date(
    request: &dyn HttpRequestView,
    header: &str,
    fallback: bool,
    zone: &CaptureZone,
) -> Option<String> {
    let raw = request.header(header);
    let instant = request
        .date_header(header)
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .or_else(|| raw.as_deref().and_then(parse_zoned_date_time));

    instant
        .and_then(|instant| zone.format(instant))
        .or_else(|| fall_back(raw.as_deref(), header, fallback))
}

/// Read `header` as a canonical UUID, returned in lowercase hyphenated form.
pub fn from_uuid(request: &dyn HttpRequestView, header: &str, fallback: bool) -> Option<String> {
    let raw = request.header(header);
    raw.as_deref()
        .and_then(canonical_uuid)
        .or_else(|| fall_back(raw.as_deref(), header, fallback))
}

/// Read `header` as a base-10 integer.
pub fn from_int(request: &dyn HttpRequestView, header: &str, fallback: bool) -> Option<String> {
    match request.int_header(header)? {
        Ok(value) => Some(value.to_string()),
        Err(_) => fall_back(request.header(header).as_deref(), header, fallback),
    }
}

/// Parse an RFC 3339 date-time with a mandatory offset and an optional
/// trailing `[Region/Zone]`, which must name a known zone.
pub fn parse_zoned_date_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    let stamp = match raw.strip_suffix(']').and_then(|rest| rest.split_once('[')) {
        Some((stamp, region)) => {
            region.parse::<Tz>().ok()?;
            stamp
        }
        None => raw,
    };

    DateTime::parse_from_rfc3339(stamp)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Lowercase hyphenated form of a canonical 8-4-4-4-12 UUID.
///
/// Braced, URN and unhyphenated encodings are rejected.
pub fn canonical_uuid(raw: &str) -> Option<String> {
    if raw.len() != CANONICAL_UUID_LEN {
        return None;
    }
    Uuid::parse_str(raw).ok().map(|id| id.hyphenated().to_string())
}

fn fall_back(raw: Option<&str>, header: &str, fallback: bool) -> Option<String> {
    let raw = raw?;
    if fallback {
        tracing::trace!(header, "keeping raw header value after failed parse");
        Some(raw.to_string())
    } else {
        tracing::trace!(header, "dropping unparsable header value");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::HttpRequestSnapshot;
    use http::Request;

    fn request(headers: &[(&str, &str)]) -> HttpRequestSnapshot {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        HttpRequestSnapshot::from_request(
            &builder.body(()).unwrap(),
            "127.0.0.1:40000".parse().unwrap(),
            "127.0.0.1:8080".parse().unwrap(),
        )
    }

    fn utc() -> CaptureZone {
        CaptureZone::Named(chrono_tz::UTC)
    }

    fn is_timestamp_shape(s: &str) -> bool {
        let b = s.as_bytes();
        b.len() == 29
            && b[4] == b'-'
            && b[7] == b'-'
            && b[10] == b'T'
            && b[13] == b':'
            && b[16] == b':'
            && b[19] == b'.'
            && (b[23] == b'+' || b[23] == b'-')
            && b[26] == b':'
            && !s.contains('Z')
    }

    #[test]
    fn http_date_header_is_normalized() {
        let req = request(&[("Date", "Sun, 06 Nov 1994 08:49:37 GMT")]);
        assert_eq!(
            from_date(&req, "Date", false, &utc()).as_deref(),
            Some("1994-11-06T08:49:37.000+00:00")
        );
    }

    #[test]
    fn rfc3339_date_is_converted_to_configured_zone() {
        let req = request(&[("Date", "2024-05-01T10:00:00.5Z")]);
        let paris = CaptureZone::Named(chrono_tz::Europe::Paris);
        assert_eq!(
            from_date(&req, "Date", false, &paris).as_deref(),
            Some("2024-05-01T12:00:00.500+02:00")
        );
    }

    #[test]
    fn rfc3339_dates_render_fixed_width_numeric_offset() {
        for raw in [
            "2024-01-31T23:59:59Z",
            "2024-01-31T23:59:59.123456789-07:00",
            "1999-12-31T00:00:00+14:00",
            "2011-12-03T10:15:30+01:00[Europe/Paris]",
        ] {
            let req = request(&[("Date", raw)]);
            let out = from_date(&req, "Date", false, &utc()).unwrap();
            assert!(is_timestamp_shape(&out), "{raw} rendered as {out}");
        }
    }

    #[test]
    fn malformed_date_respects_fallback() {
        let req = request(&[("Date", "not a date")]);
        assert_eq!(from_date(&req, "Date", false, &utc()), None);
        assert_eq!(
            from_date(&req, "Date", true, &utc()).as_deref(),
            Some("not a date")
        );
    }

    #[test]
    fn date_whose_zoned_year_overflows_is_a_parse_failure() {
        let req = request(&[("Date", "9999-12-31T23:00:00Z")]);
        let kiritimati = CaptureZone::Named(chrono_tz::Pacific::Kiritimati);
        assert_eq!(from_date(&req, "Date", false, &kiritimati), None);
        assert_eq!(
            from_date(&req, "Date", true, &kiritimati).as_deref(),
            Some("9999-12-31T23:00:00Z")
        );
        assert_eq!(
            from_date(&req, "Date", false, &utc()).as_deref(),
            Some("9999-12-31T23:00:00.000+00:00")
        );
    }

    #[test]
    fn missing_date_is_absent_even_with_fallback() {
        let req = request(&[]);
        assert_eq!(from_date(&req, "Date", true, &utc()), None);
    }

    #[test]
    fn unknown_region_suffix_is_rejected() {
        assert!(parse_zoned_date_time("2011-12-03T10:15:30+01:00[Nowhere/Land]").is_none());
        assert!(parse_zoned_date_time("2011-12-03T10:15:30+01:00[Europe/Paris]").is_some());
    }

    #[test]
    fn uuid_is_lowercased_and_stable() {
        let req = request(&[("WF-Request-ID", "3F2504E0-4F89-11D3-9A0C-0305E82C3301")]);
        let out = from_uuid(&req, "WF-Request-ID", false).unwrap();
        assert_eq!(out, "3f2504e0-4f89-11d3-9a0c-0305e82c3301");
        assert_eq!(canonical_uuid(&out).as_deref(), Some(out.as_str()));
    }

    #[test]
    fn non_canonical_uuid_forms_fail() {
        assert_eq!(canonical_uuid("3f2504e04f8911d39a0c0305e82c3301"), None);
        assert_eq!(canonical_uuid("{3f2504e0-4f89-11d3-9a0c-0305e82c3301}"), None);
        assert_eq!(canonical_uuid("3f2504e0-4f89-11d3-9a0c-0305e82c330g"), None);
    }

    #[test]
    fn bad_uuid_respects_fallback() {
        let req = request(&[("WF-Request-ID", "req-42")]);
        assert_eq!(from_uuid(&req, "WF-Request-ID", false), None);
        assert_eq!(from_uuid(&req, "WF-Request-ID", true).as_deref(), Some("req-42"));
        assert_eq!(from_uuid(&request(&[]), "WF-Request-ID", true), None);
    }

    #[test]
    fn int_header_parses_or_falls_back() {
        let req = request(&[("Max-Forwards", "7"), ("X-Count", "seven"), ("X-Delta", "-12")]);
        assert_eq!(from_int(&req, "Max-Forwards", false).as_deref(), Some("7"));
        assert_eq!(from_int(&req, "X-Delta", false).as_deref(), Some("-12"));
        assert_eq!(from_int(&req, "X-Count", false), None);
        assert_eq!(from_int(&req, "X-Count", true).as_deref(), Some("seven"));
        assert_eq!(from_int(&req, "X-Missing", true), None);
    }
}
