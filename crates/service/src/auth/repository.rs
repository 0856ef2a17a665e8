use async_trait::async_trait;

use super::domain::{AuthUser, Credentials, SignupInput};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
///
/// Implemented by `repo::SeaOrmRepository` and, for tests and doc examples,
/// `repo::InMemoryRepository`.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Credentials>, AuthError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Credentials>, AuthError>;
    async fn create_user(&self, input: &SignupInput, password_hash: String) -> Result<AuthUser, AuthError>;
    async fn list_users(&self) -> Result<Vec<AuthUser>, AuthError>;
}
