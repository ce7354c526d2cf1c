use axum::{
    http::{header::CACHE_CONTROL, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;

use crate::config::CACHE_CONTROL_ERROR;
use crate::middleware::RequestId;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Attach the request ID so the client can quote it when reporting the error.
    pub fn with_request_id(self, request_id: &RequestId) -> AppErrorResponse {
        AppErrorResponse {
            error: self,
            request_id: Some(*request_id),
        }
    }
}

/// An error paired with the ID of the request that produced it.
#[derive(Debug)]
pub struct AppErrorResponse {
    pub error: AppError,
    pub request_id: Option<RequestId>,
}

impl From<AppError> for AppErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error,
            request_id: None,
        }
    }
}

impl IntoResponse for AppErrorResponse {
    fn into_response(self) -> Response {
        let status = self.error.status();
        let mut body = json!({ "error": self.error.to_string() });
        if let Some(RequestId(id)) = self.request_id {
            body["request_id"] = json!(id.to_string());
        }

        let mut response = (status, Json(body)).into_response();
        response
            .headers_mut()
            .insert(CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_ERROR));
        response
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        AppErrorResponse::from(self).into_response()
    }
}

/// Router fallback for paths with no matching route.
pub async fn not_found(
    Extension(request_id): Extension<RequestId>,
    uri: Uri,
) -> AppErrorResponse {
    tracing::debug!(path = %uri.path(), request_id = %request_id.0, "No route matched");
    AppError::NotFound(uri.path().to_string()).with_request_id(&request_id)
}
