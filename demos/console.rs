use http::{Method, Request, StatusCode};
use weblog_capture::backend::backend_from_env;
use weblog_capture::config::CapturerConfig;
use weblog_capture::init::init_tracing;
use weblog_capture::snapshot::HttpRequestSnapshot;
use weblog_capture::RequestLogger;

/// Logs a couple of simulated requests through the backend selected by
/// `WEBLOG_BACKEND` (default: `tracing` rendered to the console).
fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing()?;

    let config = CapturerConfig::from_env()?.with_application_id("console-demo");
    let logger = RequestLogger::new(backend_from_env()?, config);

    let remote = "203.0.113.7:51812".parse()?;
    let local = "127.0.0.1:8080".parse()?;

    for (uri, status) in [("/api/items", StatusCode::CREATED), ("/api/missing", StatusCode::NOT_FOUND)] {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("Host", "localhost:8080")
            .header("Content-Type", "application/json")
            .header("Content-Length", "42")
            .header("Date", "Tue, 15 Nov 1994 08:12:31 GMT")
            .body(())?;
        let snapshot = HttpRequestSnapshot::from_request(&request, remote, local);

        logger.reset()?;
        logger.capture_log_context(&snapshot)?;
        logger.web_log(&snapshot, &status)?;
    }

    Ok(())
}
