use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use service::storage::StorageError;
use thiserror::Error;
use tracing::{debug, error};

pub const GENERIC_ERROR: &str = "An error occurred";

/// Error returned by every handler; renders as `{ "error", "message" }`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &str, message: Option<String>) -> Self {
        Self { status, error: error.to_string(), message }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, GENERIC_ERROR, Some(message.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.error, message = ?self.message, "request failed");
        }
        (self.status, Json(ErrorBody::new(self.error, self.message))).into_response()
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        debug!(code = e.code(), error = %e, "auth request rejected");
        let msg = Some(e.to_string());
        match e {
            AuthError::BadCredentials => Self::new(StatusCode::UNAUTHORIZED, "Invalid username or password", Some("Bad credentials".into())),
            AuthError::UserNotFound(_) => Self::new(StatusCode::UNAUTHORIZED, "User not found", msg),
            AuthError::Validation(m) => Self::new(StatusCode::BAD_REQUEST, GENERIC_ERROR, Some(m)),
            AuthError::Conflict(m) => Self::new(StatusCode::CONFLICT, GENERIC_ERROR, Some(m)),
            AuthError::MissingToken => Self::new(StatusCode::BAD_REQUEST, "Missing token", msg),
            AuthError::InvalidToken(_) => Self::new(StatusCode::UNAUTHORIZED, "Invalid token", msg),
            AuthError::HashError(_) | AuthError::TokenError(_) | AuthError::Repository(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", msg)
            }
        }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(m) => Self::new(StatusCode::BAD_REQUEST, GENERIC_ERROR, Some(m)),
            ServiceError::NotFound(m) => Self::new(StatusCode::NOT_FOUND, GENERIC_ERROR, Some(m)),
            ServiceError::Conflict(m) => Self::new(StatusCode::CONFLICT, GENERIC_ERROR, Some(m)),
            ServiceError::Db(m) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(m)),
            ServiceError::Storage(s @ (StorageError::InvalidKey(_) | StorageError::InvalidUrl(_))) => {
                Self::new(StatusCode::BAD_REQUEST, GENERIC_ERROR, Some(s.to_string()))
            }
            ServiceError::Storage(s) => Self::new(StatusCode::BAD_GATEWAY, "Storage Error", Some(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage setup failed: {0}")]
    Storage(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
