//! Integration tests for the Campus platform.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process router tests (no database needed)
//! cargo test -p campus-integration-tests
//!
//! # Database-backed tests (require PostgreSQL)
//! CAMPUS_TEST_DATABASE_URL=postgres://localhost/campus_test \
//!     cargo test -p campus-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `http_auth` - Router and bearer-token middleware behavior
//! - `login_flow` - Cascade plus token issuance end to end
//! - `db_roundtrip` - Repository behavior against a real database

use std::collections::HashSet;

use campus_api::config::CampusConfig;
use campus_api::state::AppState;
use campus_core::DepartmentId;
use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;

/// Signing secret used across the test suite.
pub const TEST_TOKEN_SECRET: &str = "kX9#mP2$vL7@qR4!wT8&nB5^jF1*zH6d";

/// Build an [`AppState`] backed by a lazy pool.
///
/// The pool never connects unless a handler actually touches the
/// database, so middleware and routing behavior can be exercised without
/// `PostgreSQL` running.
///
/// # Panics
///
/// Panics if the placeholder connection string fails to parse.
#[must_use]
pub fn test_state(excluded_departments: HashSet<DepartmentId>) -> AppState {
    let config = CampusConfig {
        database_url: SecretString::from("postgres://localhost/campus_test"),
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        token_secret: SecretString::from(TEST_TOKEN_SECRET),
        token_ttl_secs: 3600,
        excluded_departments,
        store_timeout: None,
        lenient_store_timeouts: true,
        sentry_dsn: None,
    };

    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/campus_test")
        .expect("lazy pool");

    AppState::new(config, pool)
}
