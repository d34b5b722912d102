//! Database operations for the Campus `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `role` - Role lookup table (inconsistently spelled names live here)
//! - `department` - Departments (id, code)
//! - `admin_account` - Administrative accounts
//! - `faculty_account` - Faculty accounts (incl. department-admin hybrids)
//! - `student_account` - Student accounts
//! - `announcement` - Role/department-scoped announcements
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p campus-cli -- migrate
//! ```

pub mod admins;
pub mod announcements;
pub mod faculty;
pub mod students;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use admins::AdminRepository;
pub use announcements::AnnouncementRepository;
pub use faculty::FacultyRepository;
pub use students::StudentRepository;

use crate::models::{AdminAccount, FacultyAccount, StudentAccount};
use crate::services::auth::IdentityStores;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Store call exceeded the configured deadline.
    ///
    /// The cascade may treat this as a non-match instead of a hard
    /// failure, depending on configuration.
    #[error("store call timed out")]
    Timeout,
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// `PostgreSQL`-backed credential stores.
///
/// Bundles the three per-store repositories behind the [`IdentityStores`]
/// seam the cascade resolves against. Every call is bounded by the
/// configured per-store deadline, if any.
#[derive(Clone)]
pub struct PgStores {
    pool: PgPool,
    deadline: Option<Duration>,
}

impl PgStores {
    /// Create a new store bundle.
    #[must_use]
    pub const fn new(pool: PgPool, deadline: Option<Duration>) -> Self {
        Self { pool, deadline }
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, RepositoryError>>,
    {
        match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, fut)
                .await
                .map_err(|_| RepositoryError::Timeout)?,
            None => fut.await,
        }
    }
}

impl IdentityStores for PgStores {
    async fn faculty_by_email(&self, email: &str) -> Result<Option<FacultyAccount>, RepositoryError> {
        self.bounded(FacultyRepository::new(&self.pool).find_by_email(email))
            .await
    }

    async fn faculty_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<FacultyAccount>, RepositoryError> {
        self.bounded(FacultyRepository::new(&self.pool).find_by_identifier(identifier))
            .await
    }

    async fn student_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<StudentAccount>, RepositoryError> {
        self.bounded(StudentRepository::new(&self.pool).find_by_identifier(identifier))
            .await
    }

    async fn admin_by_email(&self, email: &str) -> Result<Option<AdminAccount>, RepositoryError> {
        self.bounded(AdminRepository::new(&self.pool).find_by_email(email))
            .await
    }

    async fn update_admin_password(
        &self,
        id: campus_core::AdminId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        self.bounded(AdminRepository::new(&self.pool).update_password(id, password_hash))
            .await
    }

    async fn update_faculty_password(
        &self,
        id: campus_core::FacultyId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        self.bounded(FacultyRepository::new(&self.pool).update_password(id, password_hash))
            .await
    }

    async fn update_student_password(
        &self,
        id: campus_core::StudentId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        self.bounded(StudentRepository::new(&self.pool).update_password(id, password_hash))
            .await
    }
}
