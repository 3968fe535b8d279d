use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::todo_service::ServiceError;

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody { pub error: String }

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_id() -> Self { ApiError::BadRequest("Invalid todo ID".into()) }

    pub fn invalid_payload() -> Self { ApiError::BadRequest("Invalid request payload".into()) }

    pub fn internal<E: std::fmt::Display>(e: E) -> Self {
        tracing::error!(error = %e, "storage failure");
        ApiError::Internal(e.to_string())
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::InvalidContent(e) => ApiError::BadRequest(e.to_string()),
            ServiceError::DoesNotExist => ApiError::BadRequest(ServiceError::DoesNotExist.to_string()),
            ServiceError::Storage(e) => ApiError::internal(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), axum::Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

/// JSON body extractor that ignores `Content-Type` and turns every decoding
/// failure into a 400 `Invalid request payload`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|_| ApiError::invalid_payload())?;
        decode_json(&bytes).map(ApiJson)
    }
}

/// Decodes a request body already read as bytes, for handlers that must
/// validate something else before looking at the payload.
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|_| ApiError::invalid_payload())
}
