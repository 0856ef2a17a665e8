use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use serde::Serialize;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest { pub username: String, pub email: String, pub first_name: String, pub last_name: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: Option<String>, pub email: Option<String>, pub password: String }

#[derive(ToSchema)]
pub struct LoginResponseDoc { pub message: String, pub token: String, pub username: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDoc { pub id: Uuid, pub username: String, pub email: String, pub first_name: String, pub last_name: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PictureDoc { pub id: Uuid, pub event_id: Uuid, pub url: String, pub hashtags: String, pub created_at: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDoc {
    pub id: Uuid,
    pub name: String,
    #[schema(example = "2030-06-01")]
    pub date: String,
    pub host_name: String,
    #[schema(example = "18:00:00")]
    pub start_time: String,
    pub end_time: String,
    pub location: Option<String>,
    pub usernames: Vec<String>,
    pub pictures: Vec<PictureDoc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewEventDoc {
    pub name: String,
    #[schema(example = "2030-06-01")]
    pub date: String,
    pub host_name: String,
    #[schema(example = "18:00")]
    pub start_time: String,
    pub end_time: String,
    pub location: Option<String>,
    pub usernames: Option<Vec<String>>,
}

#[derive(ToSchema)]
pub struct AddPictureDoc { pub url: String, pub hashtags: Option<String> }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Base64UploadDoc { pub image: String, pub event_id: Uuid, pub hashtags: Option<String> }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadFormDoc {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    pub event_id: Uuid,
    pub hashtags: Option<String>,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::signup,
        crate::routes::users::login,
        crate::routes::users::list_users,
        crate::routes::events::list,
        crate::routes::events::create,
        crate::routes::events::get,
        crate::routes::events::delete,
        crate::routes::events::join,
        crate::routes::events::add_picture,
        crate::routes::pictures::list,
        crate::routes::pictures::get,
        crate::routes::pictures::delete,
        crate::routes::pictures::by_hashtag,
        crate::routes::pictures::by_event,
        crate::routes::pictures::upload,
        crate::routes::pictures::upload_base64,
    ),
    components(
        schemas(
            HealthResponse,
            SignupRequest,
            LoginRequest,
            LoginResponseDoc,
            UserDoc,
            PictureDoc,
            EventDoc,
            NewEventDoc,
            AddPictureDoc,
            Base64UploadDoc,
            UploadFormDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "users"),
        (name = "events"),
        (name = "pictures")
    )
)]
pub struct ApiDoc;
