use std::sync::Arc;

use axum::{extract::{Request, State}, http::{header, Method}, middleware::Next, response::Response};

use service::auth::{errors::AuthError, repository::AuthRepository, AuthService, TokenIssuer};
use service::events::{repository::EventRepository, EventService};
use service::pictures::{repository::PictureRepository, PictureService};
use service::storage::ObjectStore;

use crate::errors::JsonApiError;

pub const AUTH_COOKIE: &str = "auth_token";

/// Shared handler state: one service per aggregate, all behind trait objects
/// so tests can swap in the in-memory repository.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<dyn AuthRepository>>,
    pub events: Arc<EventService<dyn EventRepository>>,
    pub pictures: Arc<PictureService<dyn PictureRepository>>,
}

impl ServerState {
    pub fn new<R>(repo: Arc<R>, tokens: TokenIssuer, store: Arc<dyn ObjectStore>) -> Self
    where
        R: AuthRepository + EventRepository + PictureRepository + 'static,
    {
        let auth_repo: Arc<dyn AuthRepository> = repo.clone();
        let event_repo: Arc<dyn EventRepository> = repo.clone();
        let picture_repo: Arc<dyn PictureRepository> = repo;
        Self {
            auth: Arc::new(AuthService::new(auth_repo, tokens)),
            events: Arc::new(EventService::new(event_repo)),
            pictures: Arc::new(PictureService::new(picture_repo, store)),
        }
    }
}

fn is_public(path: &str, method: &Method) -> bool {
    // 白名单：健康检查、登录与注册、Swagger 文档、上传文件、CORS 预检
    path == "/health"
        || path == "/users/login"
        || path == "/users/signup"
        || path.starts_with("/docs")
        || path.starts_with("/api-docs")
        || path.starts_with("/uploads/")
        || method == Method::OPTIONS
}

/// Token from `Authorization: Bearer <jwt>`, falling back to the `auth_token`
/// cookie. `Err` when the header is present but not a bearer token.
fn extract_token(req: &Request) -> Result<Option<String>, AuthError> {
    if let Some(h) = req.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        return match h.strip_prefix("Bearer ") {
            Some(t) if !t.trim().is_empty() => Ok(Some(t.trim().to_string())),
            _ => Err(AuthError::InvalidToken("expected Bearer token".into())),
        };
    }
    let cookie_header = req.headers().get(header::COOKIE).and_then(|v| v.to_str().ok()).unwrap_or("");
    let token = cookie_header
        .split(';')
        .filter_map(|kv| kv.trim().strip_prefix(AUTH_COOKIE).and_then(|rest| rest.strip_prefix('=')))
        .find(|t| !t.is_empty())
        .map(str::to_string);
    Ok(token)
}

/// 全局中间件：白名单之外校验 Bearer token
/// 缺失 token 返回 400，非法或过期返回 401；通过后把 Claims 放入请求扩展
pub async fn require_bearer_token_state(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    if is_public(&path, req.method()) {
        return Ok(next.run(req).await);
    }

    let token = match extract_token(&req) {
        Ok(Some(t)) => t,
        Ok(None) => {
            tracing::warn!(path = %path, "missing Authorization header and auth_token cookie");
            return Err(AuthError::MissingToken.into());
        }
        Err(e) => {
            tracing::warn!(path = %path, "invalid Authorization format (expect Bearer)");
            return Err(e.into());
        }
    };

    match state.auth.verify_token(&token) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(path = %path, err = %e, "token validation failed");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn whitelist_covers_public_paths() {
        assert!(is_public("/health", &Method::GET));
        assert!(is_public("/users/login", &Method::POST));
        assert!(is_public("/docs/index.html", &Method::GET));
        assert!(is_public("/uploads/event-1/a.jpg", &Method::GET));
        assert!(is_public("/events", &Method::OPTIONS));
        assert!(!is_public("/users", &Method::GET));
        assert!(!is_public("/events", &Method::GET));
    }

    #[test]
    fn token_from_header_or_cookie() {
        let req = Request::builder().header("authorization", "Bearer abc").body(Body::empty()).unwrap();
        assert_eq!(extract_token(&req).unwrap().as_deref(), Some("abc"));

        let req = Request::builder().header("cookie", "theme=dark; auth_token=xyz").body(Body::empty()).unwrap();
        assert_eq!(extract_token(&req).unwrap().as_deref(), Some("xyz"));

        let req = Request::builder().header("authorization", "Basic Zm9v").body(Body::empty()).unwrap();
        assert!(extract_token(&req).is_err());

        let req = Request::builder().body(Body::empty()).unwrap();
        assert!(extract_token(&req).unwrap().is_none());
    }
}
