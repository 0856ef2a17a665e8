use std::path::PathBuf;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;

pub mod auth;
pub mod users;
pub mod events;
pub mod pictures;

use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Router knobs that come from configuration.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub max_upload_bytes: usize,
    /// Directory served under `/uploads` when pictures are stored locally.
    pub uploads_dir: Option<PathBuf>,
}

impl Default for RouterOptions {
    fn default() -> Self { Self { max_upload_bytes: 10 * 1024 * 1024, uploads_dir: None } }
}

/// Build the full application router: public, protected and docs routes
pub fn build_router(state: ServerState, cors: CorsLayer, opts: RouterOptions) -> Router {
    let users = Router::<ServerState>::new()
        .route("/users", get(users::list_users))
        .route("/users/signup", post(users::signup))
        .route("/users/login", post(users::login));

    let events = Router::<ServerState>::new()
        .route("/events", get(events::list).post(events::create))
        .route("/events/:name", get(events::get).delete(events::delete))
        .route("/events/:name/join", post(events::join))
        .route("/events/:name/pictures", post(events::add_picture));

    let pictures = Router::<ServerState>::new()
        .route("/pictures", get(pictures::list))
        .route("/pictures/upload", post(pictures::upload))
        .route("/pictures/upload/base64", post(pictures::upload_base64))
        .route("/pictures/hashtag/:hashtag", get(pictures::by_hashtag))
        .route("/pictures/event/:event_id", get(pictures::by_event))
        .route("/pictures/:id", get(pictures::get).delete(pictures::delete));

    let mut app: Router<ServerState> = Router::new()
        .route("/health", get(health))
        .merge(users)
        .merge(events)
        .merge(pictures)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if let Some(dir) = opts.uploads_dir {
        app = app.nest_service("/uploads", ServeDir::new(dir));
    }

    app.layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer_token_state))
        .with_state(state)
        .layer(DefaultBodyLimit::max(opts.max_upload_bytes))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
