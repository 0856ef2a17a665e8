//! HS256 JWTs carrying the username as subject.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::errors::AuthError;

#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub issuer: String,
    pub lifetime_secs: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    lifetime_secs: i64,
}

impl TokenIssuer {
    pub fn new(cfg: &TokenConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            lifetime_secs: cfg.lifetime_secs,
        }
    }

    pub fn lifetime_secs(&self) -> i64 { self.lifetime_secs }

    pub fn issue(&self, username: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: self.issuer.clone(),
            sub: username.to_string(),
            iat: now,
            exp: now + self.lifetime_secs,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Checks signature, expiry and issuer.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer(secret: &str, iss: &str, lifetime_secs: i64) -> TokenIssuer {
        TokenIssuer::new(&TokenConfig { secret: secret.into(), issuer: iss.into(), lifetime_secs })
    }

    #[test]
    fn round_trip_keeps_subject() {
        let t = issuer("s3cret", "recall", 3600);
        let token = t.issue("johndoe").unwrap();
        let claims = t.verify(&token).unwrap();
        assert_eq!(claims.sub, "johndoe");
        assert_eq!(claims.iss, "recall");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn other_secret_is_rejected() {
        let token = issuer("one", "recall", 3600).issue("johndoe").unwrap();
        assert!(matches!(issuer("two", "recall", 3600).verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn other_issuer_is_rejected() {
        let token = issuer("s", "someone-else", 3600).issue("johndoe").unwrap();
        assert!(issuer("s", "recall", 3600).verify(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // well past the default 60s leeway
        let t = issuer("s", "recall", -600);
        let token = t.issue("johndoe").unwrap();
        assert!(t.verify(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(issuer("s", "recall", 60).verify("not.a.jwt").is_err());
    }
}
