use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::info;

use service::auth::domain::{AuthSession, AuthUser, LoginInput, SignupInput};

use crate::{errors::JsonApiError, extract::ApiJson, routes::auth::{ServerState, AUTH_COOKIE}};

#[utoipa::path(
    post, path = "/users/signup", tag = "users",
    request_body = crate::openapi::SignupRequest,
    responses(
        (status = 200, description = "Signed up", body = crate::openapi::UserDoc),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Username or email in use")
    )
)]
pub async fn signup(State(state): State<ServerState>, ApiJson(input): ApiJson<SignupInput>) -> Result<Json<AuthUser>, JsonApiError> {
    let user = state.auth.signup(input).await?;
    Ok(Json(user))
}

#[utoipa::path(
    post, path = "/users/login", tag = "users",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged In", body = crate::openapi::LoginResponseDoc),
        (status = 401, description = "Unknown user or bad password")
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    ApiJson(input): ApiJson<LoginInput>,
) -> Result<(CookieJar, Json<AuthSession>), JsonApiError> {
    let session = state.auth.login(input).await?;
    let mut cookie = Cookie::new(AUTH_COOKIE, session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    Ok((jar.add(cookie), Json(session)))
}

#[utoipa::path(
    get, path = "/users", tag = "users",
    responses((status = 200, description = "All users", body = [crate::openapi::UserDoc])),
    security(("bearer" = []))
)]
pub async fn list_users(State(state): State<ServerState>) -> Result<Json<Vec<AuthUser>>, JsonApiError> {
    let users = state.auth.list_users().await?;
    info!(count = users.len(), "list users");
    Ok(Json(users))
}
