use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub jwt: JwtConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4), max_upload_bytes: default_max_upload_bytes() }
    }
}

fn default_max_upload_bytes() -> usize { 10 * 1024 * 1024 }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    /// Wipe and reload the demo users/events/pictures on startup.
    #[serde(default)]
    pub seed_demo_data: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            seed_demo_data: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret_key: String,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_token_lifetime")]
    pub lifetime_secs: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self { secret_key: String::new(), issuer: default_issuer(), lifetime_secs: default_token_lifetime() }
    }
}

fn default_issuer() -> String { "recall".into() }
fn default_token_lifetime() -> i64 { 3600 }

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,
    #[serde(default = "default_allowed_headers")]
    pub allowed_headers: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            allowed_methods: default_allowed_methods(),
            allowed_headers: default_allowed_headers(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> { vec!["http://localhost:8000".into()] }
fn default_allowed_methods() -> Vec<String> {
    ["GET", "POST", "PUT", "DELETE", "OPTIONS"].iter().map(|s| s.to_string()).collect()
}
fn default_allowed_headers() -> Vec<String> { vec!["Authorization".into(), "Content-Type".into()] }

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Remote object-storage HTTP API.
    Http,
    /// Plain directory served by the app under `/uploads`.
    #[default]
    Local,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub service_key: String,
    #[serde(default = "default_bucket")]
    pub bucket: String,
    #[serde(default = "default_local_dir")]
    pub local_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            url: String::new(),
            service_key: String::new(),
            bucket: default_bucket(),
            local_dir: default_local_dir(),
        }
    }
}

fn default_bucket() -> String { "event-pictures".into() }
fn default_local_dir() -> String { "uploads".into() }
fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }

fn config_path() -> String { std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string()) }

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

/// `None` only when the file does not exist; unreadable or malformed files
/// are errors.
pub fn load_if_present(path: &str) -> Result<Option<AppConfig>> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse(&content).map(Some).map_err(|e| anyhow!("{path}: {e}")),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(anyhow!("cannot read {path}: {e}")),
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Like `load_and_validate`, but a missing config file falls back to
    /// defaults plus environment variables.
    pub fn load_or_env() -> Result<Self> {
        let mut cfg = load_if_present(&config_path())?.unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.jwt.normalize_from_env();
        self.jwt.validate()?;
        self.storage.normalize_from_env();
        self.storage.validate()?;
        Ok(())
    }
}

fn env_or_keep(current: &mut String, key: &str) {
    if current.trim().is_empty() {
        if let Ok(v) = std::env::var(key) {
            *current = v;
        }
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        if self.max_upload_bytes == 0 {
            self.max_upload_bytes = default_max_upload_bytes();
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        env_or_keep(&mut self.url, "DATABASE_URL");
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl JwtConfig {
    pub fn normalize_from_env(&mut self) {
        env_or_keep(&mut self.secret_key, "JWT_SECRET");
    }

    pub fn validate(&self) -> Result<()> {
        if self.secret_key.trim().is_empty() {
            return Err(anyhow!("jwt.secret_key is empty; set it in config.toml or JWT_SECRET"));
        }
        if self.lifetime_secs <= 0 {
            return Err(anyhow!("jwt.lifetime_secs must be positive"));
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        env_or_keep(&mut self.url, "STORAGE_URL");
        env_or_keep(&mut self.service_key, "STORAGE_SERVICE_KEY");
        if let Ok(bucket) = std::env::var("STORAGE_BUCKET") {
            self.bucket = bucket;
        }
        // trailing slashes would double up when building object URLs
        while self.url.ends_with('/') {
            self.url.pop();
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.backend {
            StorageBackend::Http => {
                if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
                    return Err(anyhow!("storage.url must start with http(s) when backend = \"http\""));
                }
                if self.service_key.trim().is_empty() {
                    return Err(anyhow!("storage.service_key is required when backend = \"http\""));
                }
                if self.bucket.trim().is_empty() {
                    return Err(anyhow!("storage.bucket must not be empty"));
                }
            }
            StorageBackend::Local => {
                if self.local_dir.trim().is_empty() {
                    return Err(anyhow!("storage.local_dir must not be empty"));
                }
            }
        }
        Ok(())
    }
}
