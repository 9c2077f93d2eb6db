use crate::config::CapturerConfig;
use crate::extract::{capture_if_present, capture_web_log};
use crate::fields;
use crate::parse::from_uuid;
use crate::sink::{CaptureSink, SinkResult};
use crate::snapshot::{RequestView, ResponseView};
use std::error::Error;
use uuid::Uuid;

/// Turns one request/response pair into captured fields plus exactly one
/// emitted record on the wrapped [`CaptureSink`].
///
/// Everything runs synchronously on the calling thread. Sink failures are
/// returned unchanged; the logger never retries and never resets the
/// sink's store on its own.
#[derive(Debug, Clone, Default)]
pub struct RequestLogger<S> {
    sink: S,
    config: CapturerConfig,
}

impl<S: CaptureSink> RequestLogger<S> {
    pub fn new(sink: S, config: CapturerConfig) -> Self {
        RequestLogger { sink, config }
    }

    /// Rebuild this logger around an updated configuration.
    pub fn with_config(self, config: CapturerConfig) -> Self {
        RequestLogger { sink: self.sink, config }
    }

    pub fn config(&self) -> &CapturerConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Whether a web log event type was configured explicitly.
    pub fn is_web_logging(&self) -> bool {
        self.config.is_web_logging()
    }

    /// Rebind the sink to a named logger.
    pub fn set_log_name(&mut self, name: &str) {
        self.sink.set_log_name(name);
    }

    /// Clear the sink's contextual store.
    pub fn reset(&self) -> SinkResult {
        self.sink.reset()
    }

    /// Capture every web log field, the event type, and emit one record.
    ///
    /// **Severity**
    /// - WARN with `error` attached when `error` is `Some`, whatever the status.
    /// - WARN when the response status is 400 or above.
    /// - INFO otherwise.
    ///
    /// The message is always empty; the record is carried by the fields.
    pub fn log(
        &self,
        request: &dyn RequestView,
        response: &dyn ResponseView,
        error: Option<&dyn Error>,
    ) -> SinkResult {
        capture_web_log(&self.sink, request, response, &self.config)?;
        self.sink
            .capture(fields::LOG_EVENT_TYPE, self.config.web_log_event_type())?;

        match error {
            Some(error) => self.sink.warn_with_error("", error),
            None if response.status().is_some_and(|status| status >= 400) => self.sink.warn(""),
            None => self.sink.info(""),
        }
    }

    /// [`log`](Self::log) for a request that completed without an error.
    pub fn web_log(&self, request: &dyn RequestView, response: &dyn ResponseView) -> SinkResult {
        self.log(request, response, None)
    }

    /// Capture the application id and a correlation id for `request`.
    ///
    /// A canonical UUID in the `WF-Request-ID` header is reused; anything
    /// else (missing, malformed, non-HTTP request) gets a fresh v4 UUID.
    /// Meant to run once per request before downstream work starts.
    pub fn capture_log_context(&self, request: &dyn RequestView) -> SinkResult {
        capture_if_present(
            &self.sink,
            fields::APPLICATION_ID,
            self.config.application_id.as_deref(),
        )?;

        let request_id = request
            .as_http()
            .and_then(|http| from_uuid(http, fields::REQUEST_ID_HEADER, false))
            .unwrap_or_else(|| {
                let generated = Uuid::new_v4().to_string();
                tracing::debug!(request_id = %generated, "generated request id");
                generated
            });
        self.sink.capture(fields::REQUEST_ID, &request_id)
    }
}
