use axum::body::to_bytes;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::shared::format::format_number;

/// Logs method, path, status, duration and response size of every request
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Buffer the body to learn its real size
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(
                "{} {} -> {} in {}ms, body read failed: {}",
                method,
                path,
                parts.status.as_u16(),
                start.elapsed().as_millis(),
                e
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let status = parts.status.as_u16();
    let duration = start.elapsed().as_millis();
    let size = format_number(bytes.len());
    if parts.status.is_server_error() {
        tracing::error!("{} {} -> {} in {}ms, {} bytes", method, path, status, duration, size);
    } else if parts.status.is_client_error() {
        tracing::warn!("{} {} -> {} in {}ms, {} bytes", method, path, status, duration, size);
    } else {
        tracing::info!("{} {} -> {} in {}ms, {} bytes", method, path, status, duration, size);
    }

    Response::from_parts(parts, Body::from(bytes))
}
