use std::path::Path;

use anyhow::{anyhow, Result};
use common::env::non_empty_var;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Tokio worker threads for the local server; runtime default when unset.
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: None }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Dynamodb,
    File,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dynamodb" => Ok(Self::Dynamodb),
            "file" => Ok(Self::File),
            other => Err(anyhow!("unknown store backend `{other}` (expected dynamodb or file)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Single table keyed by `Id`.
    #[serde(default = "default_table_name")]
    pub table_name: String,
    /// Only read by the `file` backend.
    #[serde(default = "default_file_path")]
    pub file_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            table_name: default_table_name(),
            file_path: default_file_path(),
        }
    }
}

/// How the authorizer treats a `Bearer ` scheme marker on the presented credential.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BearerPolicy {
    /// Strip the marker when present, accept the bare credential otherwise.
    #[default]
    Optional,
    /// Credentials without the marker are denied.
    Required,
    /// Compare the credential verbatim.
    None,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub bearer_prefix: BearerPolicy,
    #[serde(default = "default_user_token")]
    pub user_token: String,
    #[serde(default = "default_admin_token")]
    pub admin_token: String,
    /// When set, HS256 tokens carrying a `role` claim are accepted as well.
    #[serde(default)]
    pub jwt_secret: Option<String>,
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
    /// Placeholder identity reported for every authorized caller.
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default = "default_catch_faults")]
    pub catch_faults: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bearer_prefix: BearerPolicy::default(),
            user_token: default_user_token(),
            admin_token: default_admin_token(),
            jwt_secret: None,
            ttl_seconds: default_ttl_seconds(),
            user_id: default_user_id(),
            catch_faults: default_catch_faults(),
        }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_table_name() -> String { "TodoItems".into() }
fn default_file_path() -> String { "data/todos.json".into() }
fn default_user_token() -> String { "valid-token".into() }
fn default_admin_token() -> String { "admin-token".into() }
fn default_ttl_seconds() -> u64 { 300 }
fn default_user_id() -> String { "user123".into() }
fn default_catch_faults() -> bool { true }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

/// Lambda packages ship without a config file; fall back to defaults in that case.
pub fn load_or_default() -> Result<AppConfig> {
    let path = config_path();
    if Path::new(&path).exists() {
        load_from_file(&path)
    } else {
        Ok(AppConfig::default())
    }
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_or_default()?;
        cfg.apply_env()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Environment wins over the file. `DYNAMODB_TABLE` is what the deployment injects.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Some(table) = non_empty_var("DYNAMODB_TABLE") {
            self.store.table_name = table;
        }
        if let Some(backend) = non_empty_var("STORE_BACKEND") {
            self.store.backend = backend.parse()?;
        }
        if let Some(path) = non_empty_var("STORE_FILE_PATH") {
            self.store.file_path = path;
        }
        if let Some(host) = non_empty_var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = non_empty_var("SERVER_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| anyhow!("SERVER_PORT `{port}` is not a port number: {e}"))?;
        }
        if let Some(secret) = non_empty_var("AUTH_JWT_SECRET") {
            self.auth.jwt_secret = Some(secret);
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.store.validate()?;
        self.auth.normalize_and_validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        match self.backend {
            StoreBackend::Dynamodb if self.table_name.trim().is_empty() => {
                Err(anyhow!("store.table_name is empty; set it in config.toml or DYNAMODB_TABLE"))
            }
            StoreBackend::File if self.file_path.trim().is_empty() => {
                Err(anyhow!("store.file_path is empty"))
            }
            _ => Ok(()),
        }
    }
}

impl AuthConfig {
    fn normalize_and_validate(&mut self) -> Result<()> {
        self.user_token = self.user_token.trim().to_string();
        self.admin_token = self.admin_token.trim().to_string();
        if self.jwt_secret.as_deref().is_some_and(|s| s.trim().is_empty()) {
            self.jwt_secret = None;
        }
        if self.user_token.is_empty() || self.admin_token.is_empty() {
            return Err(anyhow!("auth.user_token and auth.admin_token must not be empty"));
        }
        if self.user_token == self.admin_token {
            return Err(anyhow!("auth.user_token and auth.admin_token must differ"));
        }
        if self.ttl_seconds == 0 || self.ttl_seconds > 3600 {
            return Err(anyhow!("auth.ttl_seconds must be in 1..=3600"));
        }
        if self.user_id.trim().is_empty() {
            self.user_id = default_user_id();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.store.backend, StoreBackend::Dynamodb);
        assert_eq!(cfg.store.table_name, "TodoItems");
        assert_eq!(cfg.auth.ttl_seconds, 300);
        assert_eq!(cfg.auth.bearer_prefix, BearerPolicy::Optional);
        assert_eq!(cfg.auth.user_token, "valid-token");
        assert_eq!(cfg.auth.admin_token, "admin-token");
        assert!(cfg.auth.catch_faults);
    }

    #[test]
    fn parses_partial_toml() {
        let raw = r#"
            [server]
            port = 9000

            [store]
            backend = "file"
            file_path = "/tmp/todos.json"

            [auth]
            bearer_prefix = "required"
            jwt_secret = "s3cret"
        "#;
        let mut cfg: AppConfig = toml::from_str(raw).unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.store.backend, StoreBackend::File);
        assert_eq!(cfg.store.table_name, "TodoItems");
        assert_eq!(cfg.auth.bearer_prefix, BearerPolicy::Required);
        assert_eq!(cfg.auth.jwt_secret.as_deref(), Some("s3cret"));
        assert_eq!(cfg.auth.ttl_seconds, 300);
    }

    #[test]
    fn rejects_identical_tokens() {
        let mut cfg = AppConfig::default();
        cfg.auth.admin_token = cfg.auth.user_token.clone();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn rejects_zero_ttl_and_port() {
        let mut cfg = AppConfig::default();
        cfg.auth.ttl_seconds = 0;
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn blank_jwt_secret_is_dropped() {
        let mut cfg = AppConfig::default();
        cfg.auth.jwt_secret = Some("  ".into());
        cfg.normalize_and_validate().unwrap();
        assert!(cfg.auth.jwt_secret.is_none());
    }

    #[test]
    fn backend_parses_case_insensitively() {
        assert_eq!("DynamoDB".parse::<StoreBackend>().unwrap(), StoreBackend::Dynamodb);
        assert_eq!(" file ".parse::<StoreBackend>().unwrap(), StoreBackend::File);
        assert!("postgres".parse::<StoreBackend>().is_err());
    }
}
