use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::shared::format::format_bytes;

/// Log one line per HTTP request: status, method, path, duration and body size
///
/// The response body is buffered to measure it.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(
                "{} {} {} | {}ms | body error: {}",
                parts.status.as_u16(),
                method,
                uri.path(),
                start.elapsed().as_millis(),
                e
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let status = parts.status.as_u16();
    let elapsed = start.elapsed().as_millis();
    let size = format_bytes(bytes.len());
    if parts.status.is_server_error() {
        tracing::error!("{} {} {} | {}ms | {}", status, method, uri, elapsed, size);
    } else if parts.status.is_client_error() {
        tracing::warn!("{} {} {} | {}ms | {}", status, method, uri, elapsed, size);
    } else {
        tracing::info!("{} {} {} | {}ms | {}", status, method, uri, elapsed, size);
    }

    Response::from_parts(parts, Body::from(bytes))
}
