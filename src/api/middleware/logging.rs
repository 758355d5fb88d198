//! Access log for the claim-checking API
//!
//! Emits one event when a request arrives and one when it finishes. Only a
//! short allow-list of headers is logged, and provider credentials are
//! replaced before anything is written.

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

const REQUEST_ID_HEADER: &str = "x-request-id";
const REDACTED: &str = "[REDACTED]";

/// What the access log does with a header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderPolicy {
    Show,
    Redact,
}

/// Headers worth logging for a claim check; everything else is skipped
fn header_policy(name: &str) -> Option<HeaderPolicy> {
    match name {
        "authorization" | "proxy-authorization" | "x-api-key" | "x-goog-api-key" | "cookie" => {
            Some(HeaderPolicy::Redact)
        }
        "content-type" | "content-length" | "user-agent" | "x-forwarded-for"
        | REQUEST_ID_HEADER => Some(HeaderPolicy::Show),
        _ => None,
    }
}

/// Log a request and its outcome.
///
/// Server-side failures (5xx) are logged at `warn`, everything else at
/// `info`. Spans come from `TraceLayer`.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let route = matched_route(&request);
    let request_id = request_id(request.headers());

    info!(
        method = %method,
        route = %route,
        request_id = %request_id,
        headers = %loggable_headers(request.headers()),
        "Claim checker request received"
    );

    let response = next.run(request).await;
    let status = response.status();
    let duration_ms = start.elapsed().as_millis() as u64;

    if is_server_failure(status) {
        warn!(
            method = %method,
            route = %route,
            status = status.as_u16(),
            duration_ms,
            request_id = %request_id,
            "Claim checker request failed"
        );
    } else {
        info!(
            method = %method,
            route = %route,
            status = status.as_u16(),
            duration_ms,
            request_id = %request_id,
            "Claim checker request finished"
        );
    }

    response
}

fn is_server_failure(status: StatusCode) -> bool {
    status.is_server_error()
}

/// Route template such as `/v1/claims/check`, or the raw path when unmatched
fn matched_route(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

/// Id set by `SetRequestIdLayer`; a fresh one when the layer is absent
fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// `name=value` pairs for allow-listed headers, credentials redacted
fn loggable_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let shown = match header_policy(name.as_str())? {
                HeaderPolicy::Redact => REDACTED,
                HeaderPolicy::Show => value.to_str().unwrap_or("[non-utf8]"),
            };
            Some(format!("{}={}", name.as_str(), shown))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
