use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Newtype wrapper for request ids stored in request extensions.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Response header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Format elapsed time as a human-readable string.
fn format_elapsed(elapsed_us: u128) -> String {
    if elapsed_us < 1000 {
        format!("{elapsed_us}µs")
    } else if elapsed_us < 1_000_000 {
        format!("{}ms", elapsed_us / 1000)
    } else {
        format!("{:.1}s", elapsed_us as f64 / 1_000_000.0)
    }
}

/// Request/response logging middleware.
///
/// Bodies are never logged.
pub async fn request_logging(mut req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().simple().to_string();
    req.extensions_mut().insert(RequestId(request_id.clone()));

    let method = req.method().clone();
    let path = req.uri().path().to_string();

    // Swagger UI static assets
    let quiet = path.starts_with("/docs");

    let span = tracing::info_span!("http.request", request_id = %request_id, method = %method, path = %path);

    if !quiet {
        let user_agent = req
            .headers()
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        let content_length = req
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        span.in_scope(|| {
            tracing::info!(ua = %user_agent, content_length = %content_length, "--> request");
        });
    }

    let start = Instant::now();
    let mut response = next.run(req).instrument(span.clone()).await;
    let elapsed = format_elapsed(start.elapsed().as_micros());
    let status = response.status();

    if !quiet {
        let status_code = status.as_u16();
        span.in_scope(|| {
            if status.is_server_error() {
                tracing::error!(status = status_code, elapsed = %elapsed, "<-- response");
            } else if status.is_client_error() {
                tracing::warn!(status = status_code, elapsed = %elapsed, "<-- response");
            } else {
                tracing::info!(status = status_code, elapsed = %elapsed, "<-- response");
            }
        });
    }

    if let Ok(val) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, val);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_formatting_units() {
        assert_eq!(format_elapsed(12), "12µs");
        assert_eq!(format_elapsed(4_500), "4ms");
        assert_eq!(format_elapsed(2_340_000), "2.3s");
    }
}
