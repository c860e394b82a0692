//! Request ID middleware.
//!
//! Every request gets an ID: the `X-Request-Id` a reverse proxy already
//! assigned, or a fresh UUID v4. Handlers read it from request extensions
//! to tag their logs, and the ID is echoed on the response so the frontend
//! can quote it in bug reports.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Request ID carried through request extensions.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

fn incoming_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

pub async fn request_id_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    let id = incoming_id(&headers).unwrap_or_else(|| Uuid::new_v4().to_string());
    request.extensions_mut().insert(RequestId(id.clone()));

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}
