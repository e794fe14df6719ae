use std::str::FromStr;

/// Default bind address.
const DEFAULT_HOST: &str = "0.0.0.0";
/// Default bind port.
const DEFAULT_PORT: u16 = 3000;
/// Default allowed CORS origin (local frontend dev server).
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
/// Default HTTP request timeout.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Default upper bound on pooled database connections.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be set")]
    Missing { var: &'static str },

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Where todos are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Process-local store; contents are lost on restart.
    Memory,
    /// PostgreSQL via a connection pool.
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

impl StorageConfig {
    /// Name of the backend as accepted by `STORAGE_BACKEND`.
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres { .. } => "postgres",
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Storage backend selection.
    pub storage: StorageConfig,
    /// Log output format (default: text).
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `STORAGE_BACKEND`          | `postgres`                 |
    /// | `DATABASE_URL`             | required for `postgres`    |
    /// | `DATABASE_MAX_CONNECTIONS` | `10`                       |
    /// | `LOG_FORMAT`               | `text`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let port = parse_or("PORT", &lookup, DEFAULT_PORT)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs =
            parse_or("REQUEST_TIMEOUT_SECS", &lookup, DEFAULT_REQUEST_TIMEOUT_SECS)?;

        let backend = lookup("STORAGE_BACKEND").unwrap_or_else(|| "postgres".into());
        let storage = match normalize(&backend).as_str() {
            "memory" => StorageConfig::Memory,
            "postgres" => StorageConfig::Postgres {
                database_url: lookup("DATABASE_URL")
                    .filter(|url| !url.trim().is_empty())
                    .ok_or(ConfigError::Missing {
                        var: "DATABASE_URL",
                    })?,
                max_connections: parse_or(
                    "DATABASE_MAX_CONNECTIONS",
                    &lookup,
                    DEFAULT_MAX_CONNECTIONS,
                )?,
            },
            _ => {
                return Err(ConfigError::Invalid {
                    var: "STORAGE_BACKEND",
                    value: backend,
                    reason: "expected 'postgres' or 'memory'".into(),
                })
            }
        };

        let log_format = match lookup("LOG_FORMAT") {
            None => LogFormat::default(),
            Some(value) => match normalize(&value).as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "LOG_FORMAT",
                        value,
                        reason: "expected 'text' or 'json'".into(),
                    })
                }
            },
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            storage,
            log_format,
        })
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}

fn parse_or<T, F>(var: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}
