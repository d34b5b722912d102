//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CAMPUS_DATABASE_URL` - `PostgreSQL` connection string
//! - `CAMPUS_TOKEN_SECRET` - Bearer token signing secret (min 32 chars, high entropy)
//!
//! ## Optional
//! - `CAMPUS_HOST` - Bind address (default: 127.0.0.1)
//! - `CAMPUS_PORT` - Listen port (default: 3000)
//! - `CAMPUS_TOKEN_TTL_SECS` - Token lifetime in seconds (default: 86400)
//! - `CAMPUS_EXCLUDED_DEPARTMENTS` - Comma-separated department ids whose
//!   members only see institution-wide announcements
//! - `CAMPUS_STORE_TIMEOUT_MS` - Per-store lookup deadline in milliseconds
//! - `CAMPUS_STORE_LENIENT_TIMEOUTS` - Treat a timed-out store lookup as a
//!   non-match during login (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::collections::{HashMap, HashSet};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use campus_core::DepartmentId;

const MIN_TOKEN_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Campus API configuration.
#[derive(Debug, Clone)]
pub struct CampusConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Bearer token signing secret
    pub token_secret: SecretString,
    /// Token lifetime in seconds
    pub token_ttl_secs: i64,
    /// Departments whose members only see institution-wide announcements
    pub excluded_departments: HashSet<DepartmentId>,
    /// Per-store lookup deadline, if any
    pub store_timeout: Option<Duration>,
    /// Whether a timed-out store lookup is treated as a non-match during
    /// login instead of failing the request
    pub lenient_store_timeouts: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl CampusConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("CAMPUS_DATABASE_URL")?;
        let host = get_env_or_default("CAMPUS_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CAMPUS_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("CAMPUS_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CAMPUS_PORT".to_string(), e.to_string()))?;

        let token_secret = get_validated_secret("CAMPUS_TOKEN_SECRET")?;
        validate_token_secret(&token_secret, "CAMPUS_TOKEN_SECRET")?;
        let token_ttl_secs = get_env_or_default("CAMPUS_TOKEN_TTL_SECS", "86400")
            .parse::<i64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CAMPUS_TOKEN_TTL_SECS".to_string(), e.to_string())
            })?;

        let excluded_departments =
            parse_department_ids(&get_env_or_default("CAMPUS_EXCLUDED_DEPARTMENTS", ""))?;
        let store_timeout = get_optional_env("CAMPUS_STORE_TIMEOUT_MS")
            .map(|raw| {
                raw.parse::<u64>().map(Duration::from_millis).map_err(|e| {
                    ConfigError::InvalidEnvVar("CAMPUS_STORE_TIMEOUT_MS".to_string(), e.to_string())
                })
            })
            .transpose()?;
        let lenient_store_timeouts = get_env_or_default("CAMPUS_STORE_LENIENT_TIMEOUTS", "true")
            .parse::<bool>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar(
                    "CAMPUS_STORE_LENIENT_TIMEOUTS".to_string(),
                    e.to_string(),
                )
            })?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            token_secret,
            token_ttl_secs,
            excluded_departments,
            store_timeout,
            lenient_store_timeouts,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a comma-separated list of department ids.
fn parse_department_ids(raw: &str) -> Result<HashSet<DepartmentId>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i32>().map(DepartmentId::new).map_err(|e| {
                ConfigError::InvalidEnvVar("CAMPUS_EXCLUDED_DEPARTMENTS".to_string(), e.to_string())
            })
        })
        .collect()
}

/// Validate that the token secret meets minimum length requirements.
fn validate_token_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_TOKEN_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_TOKEN_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets like API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
