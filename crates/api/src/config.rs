use std::str::FromStr;

use axum::http::HeaderValue;
use chrono::{DateTime, Local};

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be set")]
    Missing { key: &'static str },

    #[error("{key} has invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

/// Daily JSON log file written alongside stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFileConfig {
    pub active: bool,
    /// File name prefix; files are named `<file_name>.<YYYY-MM-DD>.log`.
    pub file_name: String,
    pub directory: String,
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Service identity, reported by `/version` and attached to request logs.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub service_name: String,
    pub service_type: String,
    pub service_code: String,
    pub version_release: String,
    pub version_type: String,
    pub notes: String,
    pub branch_name: String,
    pub git_commit: String,
    /// Process start time.
    pub started_at: DateTime<Local>,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the database location have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Time allowed for in-flight requests after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub log_format: LogFormat,
    pub log_file: LogFileConfig,
    pub database: DatabaseConfig,
    pub service: ServiceInfo,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                       |
    /// | `LOG_FORMAT`            | `pretty`                   |
    /// | `LOG_FILE_ACTIVE`       | `false`                    |
    /// | `LOG_FILE_NAME`         | `log`                      |
    /// | `LOG_FILE_DIR`          | `.`                        |
    /// | `DATABASE_URL`          | built from `DB_*` vars     |
    /// | `DB_MAX_CONNECTIONS`    | `20`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(&lookup);

        let host = env.string_or("HOST", "0.0.0.0");
        let port = env.parse_or("PORT", 3000u16)?;

        let cors_origins = env
            .string_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|_| ConfigError::Invalid {
                    key: "CORS_ORIGINS",
                    value: origin.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request_timeout_secs = env.parse_or("REQUEST_TIMEOUT_SECS", 30u64)?;
        let shutdown_timeout_secs = env.parse_or("SHUTDOWN_TIMEOUT_SECS", 30u64)?;
        let log_format = env.parse_or("LOG_FORMAT", LogFormat::Pretty)?;
        let log_file = LogFileConfig {
            active: env.parse_or("LOG_FILE_ACTIVE", false)?,
            file_name: env.string_or("LOG_FILE_NAME", "log"),
            directory: env.string_or("LOG_FILE_DIR", "."),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            log_format,
            log_file,
            database: DatabaseConfig::from_env(&env)?,
            service: ServiceInfo::from_env(&env),
        })
    }
}

impl DatabaseConfig {
    fn from_env(env: &Env<'_>) -> Result<Self, ConfigError> {
        let url = match env.get("DATABASE_URL") {
            Some(url) => url,
            None => {
                let host = env.get("DB_HOST").ok_or(ConfigError::Missing {
                    key: "DATABASE_URL",
                })?;
                format!(
                    "postgres://{}:{}@{}:{}/{}",
                    env.string_or("DB_USER", "postgres"),
                    env.string_or("DB_PASS", ""),
                    host,
                    env.parse_or("DB_PORT", 5432u16)?,
                    env.string_or("DB_NAME", "postgres"),
                )
            }
        };
        Ok(Self {
            url,
            max_connections: env.parse_or("DB_MAX_CONNECTIONS", 20u32)?,
        })
    }
}

impl ServiceInfo {
    fn from_env(env: &Env<'_>) -> Self {
        Self {
            service_name: env.string_or("SERVICE_NAME", ""),
            service_type: env.string_or("SERVICE_TYPE", ""),
            service_code: env.string_or("SERVICE_CODE", ""),
            version_release: env.string_or("VERSION_RELEASE", ""),
            version_type: env.string_or("VERSION_TYPE", ""),
            notes: env.string_or("VERSION_NOTES", ""),
            branch_name: env.string_or("GIT_BRANCH", ""),
            git_commit: env.string_or("GIT_COMMIT", ""),
            started_at: Local::now(),
        }
    }
}

/// Load `.env` files.
///
/// `APP_ENV` of `DEV`, `STG` or `PROD` selects `.env.dev`, `.env.stg` or
/// `.env.prod`, loaded before the plain `.env`. Neither overrides variables
/// already present in the process environment. Returns the profile file that
/// was loaded, if any, so the caller can log it once tracing is up.
pub fn load_dotenv() -> Option<&'static str> {
    let profile = match std::env::var("APP_ENV").ok().as_deref() {
        Some("DEV") => Some(".env.dev"),
        Some("STG") => Some(".env.stg"),
        Some("PROD") => Some(".env.prod"),
        _ => None,
    };
    let loaded = profile.filter(|file| dotenvy::from_filename(file).is_ok());
    dotenvy::dotenv().ok();
    loaded
}

struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    fn string_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn parse_or<T: FromStr>(&self, key: &'static str, default: T) -> Result<T, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { key, value }),
        }
    }
}
