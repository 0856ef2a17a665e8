use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{AuthSession, AuthUser, LoginInput, SignupInput};
use super::errors::AuthError;
use super::password::{hash_password, verify_password};
use super::repository::AuthRepository;
use super::token::{Claims, TokenIssuer};

pub const LOGIN_OK: &str = "Login successful";
pub const USERNAME_TAKEN: &str = "Username is already in use.";
pub const EMAIL_TAKEN: &str = "Email is already in use.";

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository + ?Sized> {
    repo: Arc<R>,
    tokens: TokenIssuer,
}

impl<R: AuthRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, tokens: TokenIssuer) -> Self { Self { repo, tokens } }

    pub fn tokens(&self) -> &TokenIssuer { &self.tokens }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, TokenConfig, TokenIssuer, domain::SignupInput};
    /// use service::repo::InMemoryRepository;
    /// use std::sync::Arc;
    /// let tokens = TokenIssuer::new(&TokenConfig { secret: "secret".into(), issuer: "recall".into(), lifetime_secs: 3600 });
    /// let svc = AuthService::new(Arc::new(InMemoryRepository::default()), tokens);
    /// let input = SignupInput::new("jdoe", "john@example.com", "John", "Doe", "secret1");
    /// let user = tokio_test::block_on(svc.signup(input)).unwrap();
    /// assert_eq!(user.username, "jdoe");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn signup(&self, input: SignupInput) -> Result<AuthUser, AuthError> {
        let violations = input.violations();
        if !violations.is_empty() {
            return Err(AuthError::Validation(violations.join("; ")));
        }
        if self.repo.find_by_username(input.username.trim()).await?.is_some() {
            debug!("username taken");
            return Err(AuthError::Conflict(USERNAME_TAKEN.into()));
        }
        if self.repo.find_by_email(input.email.trim()).await?.is_some() {
            debug!("email taken");
            return Err(AuthError::Conflict(EMAIL_TAKEN.into()));
        }

        let hash = hash_password(&input.password)?;
        let user = self.repo.create_user(&input, hash).await?;
        info!(user_id = %user.id, username = %user.username, "user_signed_up");
        Ok(user)
    }

    /// Authenticate by username or email and issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, TokenConfig, TokenIssuer, domain::{LoginInput, SignupInput}};
    /// use service::repo::InMemoryRepository;
    /// use std::sync::Arc;
    /// let tokens = TokenIssuer::new(&TokenConfig { secret: "secret".into(), issuer: "recall".into(), lifetime_secs: 3600 });
    /// let svc = AuthService::new(Arc::new(InMemoryRepository::default()), tokens);
    /// let _ = tokio_test::block_on(svc.signup(SignupInput::new("jdoe", "j@e.com", "J", "D", "Passw0rd")));
    /// let login = LoginInput { email: Some("j@e.com".into()), password: "Passw0rd".into(), ..Default::default() };
    /// let session = tokio_test::block_on(svc.login(login)).unwrap();
    /// assert_eq!(session.username, "jdoe");
    /// assert_eq!(svc.verify_token(&session.token).unwrap().sub, "jdoe");
    /// ```
    #[instrument(skip(self, input), fields(identifier = input.identifier().unwrap_or("")))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let identifier = input
            .identifier()
            .ok_or_else(|| AuthError::Validation("Username or email is required".into()))?;

        let found = match self.repo.find_by_username(identifier).await? {
            Some(c) => Some(c),
            None => self.repo.find_by_email(identifier).await?,
        };
        let creds = found.ok_or_else(|| AuthError::UserNotFound(identifier.to_string()))?;

        if !verify_password(&input.password, &creds.password_hash)? {
            debug!("password mismatch");
            return Err(AuthError::BadCredentials);
        }

        let token = self.tokens.issue(&creds.user.username)?;
        info!(user_id = %creds.user.id, "user_logged_in");
        Ok(AuthSession { message: LOGIN_OK.into(), token, username: creds.user.username })
    }

    pub async fn list_users(&self) -> Result<Vec<AuthUser>, AuthError> { self.repo.list_users().await }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> { self.tokens.verify(token) }
}
