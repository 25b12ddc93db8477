//! Configuration for Post Service
//!
//! Everything is read from environment variables (after `.env`, if present,
//! has been loaded by the binary). Database settings are delegated to
//! [`db_pool::DbConfig`].
use db_pool::env_utils::{env_flag_set, env_string_or, parse_env_with_default};
use db_pool::DbConfig;
use std::time::Duration;
use thiserror::Error;

pub const SERVICE_NAME: &str = "post-service";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("CORS_ALLOWED_ORIGINS must be set in production")]
    MissingCorsOrigins,

    #[error("CORS_ALLOWED_ORIGINS cannot be '*' in production")]
    WildcardCorsInProduction,

    #[error("LOG_FORMAT must be 'text' or 'json' (got {0:?})")]
    InvalidLogFormat(String),

    #[error("{0} must be greater than zero")]
    MustBePositive(&'static str),

    #[error("database configuration: {0}")]
    Database(String),
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub http: HttpConfig,
    pub cors: CorsConfig,
    pub log: LogConfig,
    pub database: DbConfig,
}

/// Application settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Actix worker threads
    pub workers: usize,
    /// Deadline given to every store operation a request triggers
    pub request_timeout: Duration,
    /// Serve `/swagger/` and `/v1/openapi.json`
    pub swagger_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins, or `*`
    pub allowed_origins: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is not set
    pub level: String,
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let env = env_string_or("APP_ENV", "development");
        let production = env.eq_ignore_ascii_case("production");

        let app = AppConfig {
            host: env_string_or("POST_SERVICE_HOST", "0.0.0.0"),
            port: parse_env_with_default("POST_SERVICE_PORT", 8080),
            env,
        };

        let workers: usize = parse_env_with_default("HTTP_WORKERS", 4);
        if workers == 0 {
            return Err(ConfigError::MustBePositive("HTTP_WORKERS"));
        }
        let timeout_ms: u64 = parse_env_with_default("REQUEST_TIMEOUT_MS", 5_000);
        if timeout_ms == 0 {
            return Err(ConfigError::MustBePositive("REQUEST_TIMEOUT_MS"));
        }

        let http = HttpConfig {
            workers,
            request_timeout: Duration::from_millis(timeout_ms),
            swagger_enabled: !env_flag_set("DISABLE_SWAGGER_HTTP_HANDLER"),
        };

        let cors = CorsConfig {
            allowed_origins: cors_origins(production)?,
        };

        let format = match env_string_or("LOG_FORMAT", "text").to_ascii_lowercase().as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => return Err(ConfigError::InvalidLogFormat(other.to_string())),
        };
        let log = LogConfig {
            level: env_string_or("LOG_LEVEL", "info"),
            format,
        };

        let database = DbConfig::from_env(SERVICE_NAME).map_err(ConfigError::Database)?;

        Ok(Config {
            app,
            http,
            cors,
            log,
            database,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app.env.eq_ignore_ascii_case("production")
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.app.host.clone(), self.app.port)
    }
}

fn cors_origins(production: bool) -> Result<String, ConfigError> {
    let origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match origins {
        Some(value) if production && value == "*" => Err(ConfigError::WildcardCorsInProduction),
        Some(value) => Ok(value),
        None if production => Err(ConfigError::MissingCorsOrigins),
        None => Ok("*".to_string()),
    }
}

impl CorsConfig {
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.trim() == "*"
    }

    /// Individual origins, ignoring blanks
    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
    }
}
