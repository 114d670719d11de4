//! # API Configuration Module
//!
//! Loads the CommonSlot server configuration from environment variables,
//! falling back to defaults where a value is optional.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Deadline for a whole request (default: 30)
//! - `SCHEDULE_DEFAULT_STEP_MINUTES`: Slot search step when a request omits one (default: 30)
//! - `DB_MAX_CONNECTIONS`: Size of the PostgreSQL pool (default: 5)

use commonslot_core::models::window::DEFAULT_STEP_MINUTES;
use eyre::{Result, WrapErr, ensure};
use std::{env, str::FromStr};
use tracing::Level;

/// Configuration for the CommonSlot API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use commonslot_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Step between candidate slot starts, in minutes
    pub default_step_minutes: i64,

    /// Maximum number of pooled database connections
    pub db_max_connections: u32,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - API_REQUEST_TIMEOUT_SECONDS, SCHEDULE_DEFAULT_STEP_MINUTES or
    ///   DB_MAX_CONNECTIONS is set but not a positive number
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;
        let db_max_connections: u32 =
            positive_setting("DB_MAX_CONNECTIONS", env::var("DB_MAX_CONNECTIONS").ok(), 5)?;

        // Logging settings
        let log_level =
            parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout: u64 = positive_setting(
            "API_REQUEST_TIMEOUT_SECONDS",
            env::var("API_REQUEST_TIMEOUT_SECONDS").ok(),
            30,
        )?;

        // Scheduling settings
        let default_step_minutes: i64 = positive_setting(
            "SCHEDULE_DEFAULT_STEP_MINUTES",
            env::var("SCHEDULE_DEFAULT_STEP_MINUTES").ok(),
            DEFAULT_STEP_MINUTES,
        )?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            default_step_minutes,
            db_max_connections,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parses an optional numeric setting that must be greater than zero.
fn positive_setting<T>(name: &str, value: Option<String>, default: T) -> Result<T>
where
    T: FromStr + PartialOrd + Default,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let Some(raw) = value else {
        return Ok(default);
    };
    let parsed: T = raw
        .trim()
        .parse()
        .wrap_err_with(|| format!("Invalid {} value", name))?;
    ensure!(parsed > T::default(), "{} must be positive", name);
    Ok(parsed)
}

fn parse_log_level(value: &str) -> Level {
    match value.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
