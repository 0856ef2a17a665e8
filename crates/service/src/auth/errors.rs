use thiserror::Error;

use models::errors::ModelError;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("User not found with username or email: {0}")]
    UserNotFound(String),
    #[error("Invalid username or password")]
    BadCredentials,
    #[error("missing token")]
    MissingToken,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict(_) => 1002,
            AuthError::UserNotFound(_) => 1003,
            AuthError::BadCredentials => 1004,
            AuthError::MissingToken => 1005,
            AuthError::InvalidToken(_) => 1006,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }
}

impl From<ModelError> for AuthError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(m) => AuthError::Validation(m),
            ModelError::Conflict(m) => AuthError::Conflict(m),
            ModelError::Db(m) => AuthError::Repository(m),
        }
    }
}
