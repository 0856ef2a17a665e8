use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use axum::http::{HeaderName, HeaderValue, Method};
use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, CorsConfig, StorageBackend, StorageConfig};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use service::auth::{TokenConfig, TokenIssuer};
use service::repo::SeaOrmRepository;
use service::storage::{HttpObjectStore, LocalDirStore, ObjectStore};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState, RouterOptions};

/// CORS from `[cors]`; a `*` origin allows any origin.
pub fn build_cors(cfg: &CorsConfig) -> CorsLayer {
    let methods: Vec<Method> = cfg
        .allowed_methods
        .iter()
        .filter_map(|m| m.trim().to_ascii_uppercase().parse::<Method>().ok())
        .collect();
    let headers: Vec<HeaderName> = cfg
        .allowed_headers
        .iter()
        .filter_map(|h| HeaderName::from_bytes(h.trim().as_bytes()).ok())
        .collect();
    let layer = CorsLayer::new().allow_methods(methods).allow_headers(headers);

    if cfg.allowed_origins.iter().any(|o| o.trim() == "*") {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = cfg
        .allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o.trim()) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(origins).allow_credentials(true)
}

/// Object store for `[storage]`, plus the directory to serve when local.
pub async fn build_store(cfg: &StorageConfig) -> Result<(Arc<dyn ObjectStore>, Option<PathBuf>), StartupError> {
    match cfg.backend {
        StorageBackend::Http => {
            let store = HttpObjectStore::new(&cfg.url, &cfg.service_key, &cfg.bucket)
                .map_err(|e| StartupError::Storage(e.to_string()))?;
            info!(url = %cfg.url, bucket = %cfg.bucket, "using http object storage");
            Ok((Arc::new(store), None))
        }
        StorageBackend::Local => {
            common::env::ensure_dir(&cfg.local_dir).await?;
            info!(dir = %cfg.local_dir, "using local picture storage");
            let dir = PathBuf::from(&cfg.local_dir);
            Ok((Arc::new(LocalDirStore::new(dir.clone())), Some(dir)))
        }
    }
}

pub fn token_issuer(cfg: &AppConfig) -> TokenIssuer {
    TokenIssuer::new(&TokenConfig {
        secret: cfg.jwt.secret_key.clone(),
        issuer: cfg.jwt.issuer.clone(),
        lifetime_secs: cfg.jwt.lifetime_secs,
    })
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!("migrations applied");

    if cfg.database.seed_demo_data {
        let report = service::seed::seed_demo_data(&db).await.map_err(|e| anyhow::anyhow!(e))?;
        info!(users = report.users, events = report.events, pictures = report.pictures, "demo data loaded");
    }

    let (store, uploads_dir) = build_store(&cfg.storage).await?;
    let repo = Arc::new(SeaOrmRepository::new(db));
    let state = ServerState::new(repo, token_issuer(&cfg), store);

    let opts = RouterOptions { max_upload_bytes: cfg.server.max_upload_bytes, uploads_dir };
    let app: Router = routes::build_router(state, build_cors(&cfg.cors), opts);

    let addr = bind_addr(&cfg)?;
    info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_accepts_default_config() {
        let _ = build_cors(&CorsConfig::default());
        let any = CorsConfig { allowed_origins: vec!["*".into()], ..CorsConfig::default() };
        let _ = build_cors(&any);
    }

    #[tokio::test]
    async fn local_store_creates_its_directory() {
        let dir = std::env::temp_dir().join(format!("recall-uploads-{}", uuid::Uuid::new_v4()));
        let cfg = StorageConfig { local_dir: dir.to_string_lossy().to_string(), ..StorageConfig::default() };
        let (store, served) = build_store(&cfg).await.unwrap();
        assert_eq!(store.backend_name(), "local");
        assert_eq!(served, Some(dir.clone()));
        assert!(dir.is_dir());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn bind_addr_from_config() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "127.0.0.1".into();
        cfg.server.port = 8080;
        assert_eq!(bind_addr(&cfg).unwrap().port(), 8080);
    }
}
