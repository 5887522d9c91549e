//! # Client Configuration Module
//!
//! Loads the settings the Courtside client needs from environment variables,
//! falling back to defaults where a value is optional.
//!
//! ## Environment Variables
//!
//! - `COURTSIDE_API_URL`: Base URL of the booking backend. When set at build
//!   time it becomes the default; a runtime value always wins
//!   (fallback: "http://localhost:8080")
//! - `COURTSIDE_TOKEN_PATH`: File holding the bearer token
//!   (default: `<user data dir>/courtside/token`)
//! - `COURTSIDE_LOOKAHEAD_DAYS`: Days of time slots to request and display (default: 7)
//! - `COURTSIDE_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `LOG_LEVEL`: Logging level (default: "warn")

use std::{env, path::PathBuf};

use courtside_core::availability::WINDOW_DAYS;
use directories::ProjectDirs;
use eyre::{Result, WrapErr, eyre};
use tracing::Level;

/// Backend used when nothing else is configured.
pub const DEFAULT_API_URL: &str = match option_env!("COURTSIDE_API_URL") {
    Some(url) => url,
    None => "http://localhost:8080",
};

/// Longest window the client will ask the backend for.
pub const MAX_LOOKAHEAD_DAYS: u32 = 31;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing slash
    pub api_url: String,

    /// Where the bearer token is persisted between runs
    pub token_path: PathBuf,

    /// Days of slots requested from `/free` and `/all`, and shown in the week view
    pub lookahead_days: u32,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Log level for the application
    pub log_level: Level,
}

impl ClientConfig {
    /// Creates a ClientConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `COURTSIDE_LOOKAHEAD_DAYS` is not a number between 1 and 31
    /// - `COURTSIDE_REQUEST_TIMEOUT_SECONDS` is not a positive number
    /// - no token path is configured and no user data directory can be found
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("COURTSIDE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let token_path = match env::var("COURTSIDE_TOKEN_PATH") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_token_path()?,
        };

        let lookahead_days = env::var("COURTSIDE_LOOKAHEAD_DAYS")
            .unwrap_or_else(|_| WINDOW_DAYS.to_string())
            .parse::<u32>()
            .wrap_err("Invalid COURTSIDE_LOOKAHEAD_DAYS value")?;
        if !(1..=MAX_LOOKAHEAD_DAYS).contains(&lookahead_days) {
            return Err(eyre!(
                "COURTSIDE_LOOKAHEAD_DAYS must be between 1 and {MAX_LOOKAHEAD_DAYS}"
            ));
        }

        let request_timeout = env::var("COURTSIDE_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .wrap_err("Invalid COURTSIDE_REQUEST_TIMEOUT_SECONDS value")?;
        if request_timeout == 0 {
            return Err(eyre!("COURTSIDE_REQUEST_TIMEOUT_SECONDS must be positive"));
        }

        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_default());

        Ok(Self {
            api_url: normalize_base_url(&api_url),
            token_path,
            lookahead_days,
            request_timeout,
            log_level,
        })
    }

    /// Defaults for everything but the backend and token location.
    pub fn new(api_url: &str, token_path: impl Into<PathBuf>) -> Self {
        Self {
            api_url: normalize_base_url(api_url),
            token_path: token_path.into(),
            lookahead_days: WINDOW_DAYS as u32,
            request_timeout: 30,
            log_level: Level::WARN,
        }
    }

    /// Joins an `/api/...` path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

fn default_token_path() -> Result<PathBuf> {
    ProjectDirs::from("", "", "courtside")
        .map(|dirs| dirs.data_dir().join("token"))
        .ok_or_else(|| eyre!("No home directory found; set COURTSIDE_TOKEN_PATH"))
}
