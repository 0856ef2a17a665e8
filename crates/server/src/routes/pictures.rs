use axum::{extract::{Multipart, Path, State}, http::StatusCode, Json};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use models::picture::Model as Picture;
use service::pictures::service::FileUpload;

use crate::{errors::JsonApiError, extract::ApiJson, routes::auth::ServerState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Base64Upload {
    pub image: String,
    pub event_id: Uuid,
    #[serde(default)]
    pub hashtags: String,
}

#[utoipa::path(
    get, path = "/pictures", tag = "pictures",
    responses((status = 200, description = "All pictures", body = [crate::openapi::PictureDoc])),
    security(("bearer" = []))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Picture>>, JsonApiError> {
    Ok(Json(state.pictures.list_pictures().await?))
}

#[utoipa::path(
    get, path = "/pictures/{id}", tag = "pictures",
    params(("id" = Uuid, Path, description = "Picture id")),
    responses((status = 200, description = "Found", body = crate::openapi::PictureDoc), (status = 404, description = "Not Found")),
    security(("bearer" = []))
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<Picture>, JsonApiError> {
    Ok(Json(state.pictures.get_picture(id).await?))
}

#[utoipa::path(
    delete, path = "/pictures/{id}", tag = "pictures",
    params(("id" = Uuid, Path, description = "Picture id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found")),
    security(("bearer" = []))
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    state.pictures.delete_picture(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/pictures/hashtag/{hashtag}", tag = "pictures",
    params(("hashtag" = String, Path, description = "Tag or part of one, `#` optional")),
    responses((status = 200, description = "Matching pictures", body = [crate::openapi::PictureDoc])),
    security(("bearer" = []))
)]
pub async fn by_hashtag(State(state): State<ServerState>, Path(hashtag): Path<String>) -> Result<Json<Vec<Picture>>, JsonApiError> {
    Ok(Json(state.pictures.pictures_by_hashtag(&hashtag).await?))
}

#[utoipa::path(
    get, path = "/pictures/event/{event_id}", tag = "pictures",
    params(("event_id" = Uuid, Path, description = "Event id")),
    responses((status = 200, description = "Pictures of the event, empty when unknown", body = [crate::openapi::PictureDoc])),
    security(("bearer" = []))
)]
pub async fn by_event(State(state): State<ServerState>, Path(event_id): Path<Uuid>) -> Result<Json<Vec<Picture>>, JsonApiError> {
    Ok(Json(state.pictures.pictures_by_event(event_id).await?))
}

#[utoipa::path(
    post, path = "/pictures/upload", tag = "pictures",
    request_body(content = crate::openapi::UploadFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Uploaded", body = crate::openapi::PictureDoc),
        (status = 400, description = "Empty file or bad form"),
        (status = 404, description = "Unknown event"),
        (status = 502, description = "Storage failure")
    ),
    security(("bearer" = []))
)]
pub async fn upload(State(state): State<ServerState>, mut multipart: Multipart) -> Result<(StatusCode, Json<Picture>), JsonApiError> {
    let mut file: Option<FileUpload> = None;
    let mut event_id: Option<String> = None;
    let mut hashtags = String::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| JsonApiError::bad_request(e.body_text()))? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| JsonApiError::bad_request(e.body_text()))?;
                file = Some(FileUpload { file_name, content_type, bytes: bytes.to_vec() });
            }
            "eventId" => event_id = Some(field.text().await.map_err(|e| JsonApiError::bad_request(e.body_text()))?),
            "hashtags" => hashtags = field.text().await.map_err(|e| JsonApiError::bad_request(e.body_text()))?,
            other => debug!(field = other, "ignoring multipart field"),
        }
    }

    let file = file.ok_or_else(|| JsonApiError::bad_request("Missing file"))?;
    let event_id = event_id
        .as_deref()
        .map(str::trim)
        .ok_or_else(|| JsonApiError::bad_request("Missing eventId"))
        .and_then(|raw| Uuid::parse_str(raw).map_err(|_| JsonApiError::bad_request(format!("Invalid eventId: {raw}"))))?;

    let pic = state.pictures.upload_file(event_id, file, &hashtags).await?;
    Ok((StatusCode::CREATED, Json(pic)))
}

#[utoipa::path(
    post, path = "/pictures/upload/base64", tag = "pictures",
    request_body = crate::openapi::Base64UploadDoc,
    responses(
        (status = 201, description = "Uploaded", body = crate::openapi::PictureDoc),
        (status = 400, description = "Invalid image data"),
        (status = 404, description = "Unknown event")
    ),
    security(("bearer" = []))
)]
pub async fn upload_base64(State(state): State<ServerState>, ApiJson(input): ApiJson<Base64Upload>) -> Result<(StatusCode, Json<Picture>), JsonApiError> {
    let pic = state.pictures.upload_base64(input.event_id, &input.image, &input.hashtags).await?;
    Ok((StatusCode::CREATED, Json(pic)))
}
