//! Request ID middleware for correlating logs with requests.
//!
//! Each request gets a UUID v4, or keeps the one supplied by an upstream proxy
//! in `x-request-id` when it is a hyphenated UUID. A tracing span wraps the
//! whole request so every log line carries the id, and the id is echoed back
//! in the response headers exactly as the client sent it.

use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Length of the hyphenated UUID form, the only form accepted from clients
const HYPHENATED_UUID_LEN: usize = 36;

/// Extension type for accessing request ID in handlers.
#[derive(Clone, Copy, Debug)]
pub struct RequestId(pub Uuid);

/// Returns the inbound id and its original header value.
///
/// Braced, urn and simple UUID forms are rejected so that the echoed header
/// always matches what the client sent.
fn inbound_request_id(headers: &HeaderMap) -> Option<(Uuid, Option<HeaderValue>)> {
    let value = headers.get(REQUEST_ID_HEADER)?;
    let text = value.to_str().ok()?;
    if text.len() != HYPHENATED_UUID_LEN {
        return None;
    }
    let id = Uuid::parse_str(text).ok()?;
    Some((id, Some(value.clone())))
}

/// Middleware that assigns a request ID and creates a request span.
///
/// This should be the outermost middleware layer so the span wraps
/// all request processing, including other middleware and handlers.
pub async fn request_id_layer(mut request: Request, next: Next) -> Response {
    let (request_id, header_value) = match inbound_request_id(request.headers()) {
        Some(inbound) => inbound,
        None => {
            let id = Uuid::new_v4();
            (id, HeaderValue::from_str(&id.to_string()).ok())
        }
    };

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();
    request.extensions_mut().insert(RequestId(request_id));

    async move {
        let mut response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms,
            "Request completed"
        );

        if let Some(value) = header_value {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use axum::{body::Body, middleware, routing::get, Extension, Router};
    use tower::ServiceExt;

    async fn echo_id(Extension(RequestId(id)): Extension<RequestId>) -> String {
        id.to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/", get(echo_id))
            .layer(middleware::from_fn(request_id_layer))
    }

    #[tokio::test]
    async fn test_generates_request_id() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let header = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert!(Uuid::parse_str(header).is_ok());
    }

    #[tokio::test]
    async fn test_reuses_inbound_request_id() {
        let id = Uuid::new_v4();
        let response = app()
            .oneshot(
                Request::get("/")
                    .header(REQUEST_ID_HEADER, id.to_string())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[REQUEST_ID_HEADER], id.to_string().as_str());

        let body = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        assert_eq!(body, id.to_string().as_bytes());
    }

    #[tokio::test]
    async fn test_replaces_malformed_request_id() {
        let response = app()
            .oneshot(
                Request::get("/")
                    .header(REQUEST_ID_HEADER, "not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let header = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert_ne!(header, "not-a-uuid");
        assert!(Uuid::parse_str(header).is_ok());
    }

    #[tokio::test]
    async fn test_non_hyphenated_forms_replaced() {
        let id = Uuid::new_v4();
        for inbound in [
            id.urn().to_string(),
            id.braced().to_string(),
            id.simple().to_string(),
        ] {
            let response = app()
                .oneshot(
                    Request::get("/")
                        .header(REQUEST_ID_HEADER, inbound.as_str())
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            let header = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
            assert_ne!(header, inbound);
            assert_ne!(header, id.to_string());
            assert_eq!(header.len(), HYPHENATED_UUID_LEN);
        }
    }

    #[tokio::test]
    async fn test_echoes_inbound_text_unchanged() {
        let inbound = Uuid::new_v4().to_string().to_uppercase();
        let response = app()
            .oneshot(
                Request::get("/")
                    .header(REQUEST_ID_HEADER, inbound.as_str())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[REQUEST_ID_HEADER], inbound.as_str());
    }
}
