use std::collections::HashSet;

use serde::Deserialize;

use crate::domain::auth::RoleSet;
use crate::domain::DomainError;
use crate::infrastructure::auth::{MAX_EXPIRATION_MINUTES, MIN_SECRET_BYTES};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub api_keys: Vec<ApiKeyEntry>,
    pub seed: SeedConfig,
    pub ia_health: IaHealthConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Token issuance settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub issuer: String,
    pub audience: String,
    /// HMAC signing secret, at least 32 bytes; has no usable default
    pub secret: String,
    pub expiration_minutes: u64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("secret", &"[hidden]")
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

/// One entry of the static API key table
#[derive(Clone, Deserialize, PartialEq)]
pub struct ApiKeyEntry {
    pub key: String,
    pub team_tag: String,
    pub team_id: i64,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl std::fmt::Debug for ApiKeyEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyEntry")
            .field("key", &"[hidden]")
            .field("team_tag", &self.team_tag)
            .field("team_id", &self.team_id)
            .field("roles", &self.roles)
            .finish()
    }
}

impl ApiKeyEntry {
    pub fn new(key: &str, team_tag: &str, team_id: i64, roles: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            team_tag: team_tag.to_string(),
            team_id,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// Development teams created at startup
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub enabled: bool,
    pub admin_secret: String,
    pub ia_secret: String,
    pub iot_secret: String,
}

impl std::fmt::Debug for SeedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedConfig")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Scheduled check of the IA model service
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IaHealthConfig {
    pub enabled: bool,
    pub url: String,
    /// Delay between checks
    pub interval_ms: u64,
    pub timeout_ms: u64,
}

impl Default for IaHealthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: "http://ia-service:8000/health".to_string(),
            interval_ms: 300_000,
            timeout_ms: 10_000,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            auth: AuthConfig::default(),
            api_keys: default_api_keys(),
            seed: SeedConfig::default(),
            ia_health: IaHealthConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer: "telemetry-gateway".to_string(),
            audience: "telemetry-clients".to_string(),
            secret: String::new(),
            expiration_minutes: 120,
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            admin_secret: "admin-secret".to_string(),
            ia_secret: "ia-secret".to_string(),
            iot_secret: "iot-secret".to_string(),
        }
    }
}

fn default_api_keys() -> Vec<ApiKeyEntry> {
    vec![
        ApiKeyEntry::new("chave-ia", "IA", 2, &["ROLE_IA"]),
        ApiKeyEntry::new("chave-iot", "IOT", 3, &["ROLE_IOT"]),
        ApiKeyEntry::new("chave-java", "JAVA", 4, &["ROLE_JAVA"]),
        ApiKeyEntry::new("chave-admin", "ADMIN", 1, &["ROLE_ADMIN"]),
    ]
}

/// `GATEWAY__SECTION__FIELD` variables. Values stay strings until a numeric or
/// boolean field asks for them, so all-digit secrets and keys are kept as written.
fn environment() -> config::Environment {
    config::Environment::with_prefix("GATEWAY").separator("__")
}

impl AppConfig {
    /// Load configuration from files and `GATEWAY__*` environment variables.
    ///
    /// `path` replaces the `config/default` base file when given.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let base = path.unwrap_or("config/default");

        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(path.is_some()))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?;

        config.try_deserialize()
    }

    /// Reject configurations the gateway must not start with
    pub fn validate(&self) -> Result<(), DomainError> {
        let auth = &self.auth;

        if auth.secret.len() < MIN_SECRET_BYTES {
            return Err(DomainError::configuration(format!(
                "auth.secret must be at least {} bytes",
                MIN_SECRET_BYTES
            )));
        }

        if auth.issuer.trim().is_empty() {
            return Err(DomainError::configuration("auth.issuer cannot be blank"));
        }

        if auth.audience.trim().is_empty() {
            return Err(DomainError::configuration("auth.audience cannot be blank"));
        }

        if auth.expiration_minutes == 0 || auth.expiration_minutes > MAX_EXPIRATION_MINUTES {
            return Err(DomainError::configuration(format!(
                "auth.expiration_minutes must be between 1 and {}",
                MAX_EXPIRATION_MINUTES
            )));
        }

        let health = &self.ia_health;
        if health.enabled {
            if !(health.url.starts_with("http://") || health.url.starts_with("https://")) {
                return Err(DomainError::configuration(
                    "ia_health.url must be an http(s) URL",
                ));
            }

            if health.interval_ms == 0 || health.timeout_ms == 0 {
                return Err(DomainError::configuration(
                    "ia_health.interval_ms and ia_health.timeout_ms must be greater than zero",
                ));
            }
        }

        let mut seen = HashSet::new();
        for entry in &self.api_keys {
            if entry.key.trim().is_empty() {
                return Err(DomainError::configuration("API key cannot be blank"));
            }

            if entry.team_tag.trim().is_empty() {
                return Err(DomainError::configuration(
                    "API key entry requires a team tag",
                ));
            }

            if !seen.insert(entry.key.as_str()) {
                return Err(DomainError::configuration(format!(
                    "Duplicate API key for team {}",
                    entry.team_tag
                )));
            }

            RoleSet::parse(&entry.roles).map_err(|e| {
                DomainError::configuration(format!("API key for team {}: {}", entry.team_tag, e))
            })?;
        }

        Ok(())
    }
}
