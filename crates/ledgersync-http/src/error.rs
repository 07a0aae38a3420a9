//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use ledgersync_core::error::{AccessError, CoreError};

#[derive(Debug, Error)]
pub enum ApiError {
    /// One generic message for every sign-in failure — unknown email,
    /// wrong password, and inactive account all surface identically so
    /// nothing can be enumerated. The distinct internal reason is only
    /// logged.
    #[error("invalid email or password")]
    SignInFailed,

    #[error("authentication required")]
    Unauthorized,

    #[error("permission denied")]
    Forbidden,

    #[error("no tenant associated with this account")]
    NoTenant,

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,

    #[error("internal error")]
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::SignInFailed | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden | ApiError::NoTenant => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationFailed { reason } => {
                // The reason stays in the logs; the wire gets one
                // generic message.
                tracing::warn!(%reason, "authentication failed");
                ApiError::SignInFailed
            }
            CoreError::AccessDenied(AccessError::Unauthenticated) => ApiError::Unauthorized,
            CoreError::AccessDenied(AccessError::NoTenant) => ApiError::NoTenant,
            CoreError::AccessDenied(_) => ApiError::Forbidden,
            CoreError::AlreadyExists { entity } => {
                ApiError::Conflict(format!("{entity} already exists"))
            }
            CoreError::Validation { message } => ApiError::BadRequest(message),
            CoreError::NotFound { .. } => ApiError::NotFound,
            CoreError::Storage(e) | CoreError::Crypto(e) | CoreError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                ApiError::Internal
            }
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        ApiError::from(CoreError::AccessDenied(err))
    }
}
