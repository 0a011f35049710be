//! HTTP caching middleware

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// Marks successful responses as cacheable for `max_age_sec` seconds, a zero
/// age disables caching. Views only change when the process restarts.
pub async fn http_cache(
    State(max_age_sec): State<usize>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let value = if max_age_sec == 0 || !response.status().is_success() {
        HeaderValue::from_static("no-store")
    } else {
        HeaderValue::from_str(&format!("max-age={}", max_age_sec))
            .unwrap_or_else(|_| HeaderValue::from_static("no-store"))
    };
    response.headers_mut().insert(header::CACHE_CONTROL, value);
    response
}
