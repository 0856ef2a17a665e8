use axum::{extract::{Path, State}, http::StatusCode, Extension, Json};
use serde::Deserialize;

use models::event::NewEvent;
use models::picture::Model as Picture;
use service::auth::Claims;
use service::events::domain::EventDetails;

use crate::{errors::JsonApiError, extract::ApiJson, routes::auth::ServerState};

#[derive(Debug, Deserialize)]
pub struct AddPictureInput {
    pub url: String,
    #[serde(default)]
    pub hashtags: String,
}

#[utoipa::path(
    get, path = "/events", tag = "events",
    responses((status = 200, description = "Events with attendees and pictures", body = [crate::openapi::EventDoc])),
    security(("bearer" = []))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<EventDetails>>, JsonApiError> {
    Ok(Json(state.events.list_events().await?))
}

#[utoipa::path(
    post, path = "/events", tag = "events",
    request_body = crate::openapi::NewEventDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::EventDoc),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Name in use")
    ),
    security(("bearer" = []))
)]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<NewEvent>) -> Result<(StatusCode, Json<EventDetails>), JsonApiError> {
    let created = state.events.create_event(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/events/{name}", tag = "events",
    params(("name" = String, Path, description = "Event name")),
    responses((status = 200, description = "Found", body = crate::openapi::EventDoc), (status = 404, description = "Not Found")),
    security(("bearer" = []))
)]
pub async fn get(State(state): State<ServerState>, Path(name): Path<String>) -> Result<Json<EventDetails>, JsonApiError> {
    Ok(Json(state.events.get_event(&name).await?))
}

#[utoipa::path(
    delete, path = "/events/{name}", tag = "events",
    params(("name" = String, Path, description = "Event name")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found")),
    security(("bearer" = []))
)]
pub async fn delete(State(state): State<ServerState>, Path(name): Path<String>) -> Result<StatusCode, JsonApiError> {
    state.events.delete_event(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Body is the bare username (quotes tolerated); an empty body joins as the
/// authenticated user.
fn joining_username(body: &str, claims: Option<&Claims>) -> Option<String> {
    let raw = body.trim().trim_matches('"').trim();
    if !raw.is_empty() {
        return Some(raw.to_string());
    }
    claims.map(|c| c.sub.clone())
}

#[utoipa::path(
    post, path = "/events/{name}/join", tag = "events",
    params(("name" = String, Path, description = "Event name")),
    request_body(content = String, content_type = "text/plain", description = "Username; empty joins the caller"),
    responses((status = 200, description = "Joined", body = crate::openapi::EventDoc), (status = 404, description = "Not Found")),
    security(("bearer" = []))
)]
pub async fn join(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    claims: Option<Extension<Claims>>,
    body: String,
) -> Result<Json<EventDetails>, JsonApiError> {
    let username = joining_username(&body, claims.as_ref().map(|Extension(c)| c))
        .ok_or_else(|| JsonApiError::bad_request("Username cannot be blank"))?;
    Ok(Json(state.events.join_event(&name, &username).await?))
}

#[utoipa::path(
    post, path = "/events/{name}/pictures", tag = "events",
    params(("name" = String, Path, description = "Event name")),
    request_body = crate::openapi::AddPictureDoc,
    responses((status = 201, description = "Picture attached", body = crate::openapi::PictureDoc), (status = 404, description = "Not Found")),
    security(("bearer" = []))
)]
pub async fn add_picture(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    ApiJson(input): ApiJson<AddPictureInput>,
) -> Result<(StatusCode, Json<Picture>), JsonApiError> {
    let event = state.events.get_event(&name).await?;
    let pic = state.pictures.save_picture(event.id, &input.url, &input.hashtags).await?;
    Ok((StatusCode::CREATED, Json(pic)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str) -> Claims { Claims { iss: "recall".into(), sub: sub.into(), iat: 0, exp: 0 } }

    #[test]
    fn body_wins_over_token_subject() {
        assert_eq!(joining_username("janesmith", Some(&claims("johndoe"))).as_deref(), Some("janesmith"));
        assert_eq!(joining_username("\"janesmith\"\n", None).as_deref(), Some("janesmith"));
        assert_eq!(joining_username("  ", Some(&claims("johndoe"))).as_deref(), Some("johndoe"));
        assert_eq!(joining_username("", None), None);
    }
}
