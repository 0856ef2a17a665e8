use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sign-up input, validated with the user rules.
pub type SignupInput = models::user::NewUser;

/// Login input. `username` wins over `email` when both are given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
}

impl LoginInput {
    /// The identifier used for lookup, or `None` when neither is filled in.
    pub fn identifier(&self) -> Option<&str> {
        fn pick(v: &Option<String>) -> Option<&str> {
            v.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }
        pick(&self.username).or_else(|| pick(&self.email))
    }
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<models::user::Model> for AuthUser {
    fn from(u: models::user::Model) -> Self {
        Self { id: u.id, username: u.username, email: u.email, first_name: u.first_name, last_name: u.last_name }
    }
}

/// User plus stored Argon2 PHC hash
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: AuthUser,
    pub password_hash: String,
}

impl From<models::user::Model> for Credentials {
    fn from(u: models::user::Model) -> Self {
        let password_hash = u.password_hash.clone();
        Self { user: u.into(), password_hash }
    }
}

/// Login result (session)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub message: String,
    pub token: String,
    pub username: String,
}
