//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong identifier/password combination, or no store matched.
    ///
    /// Deliberately carries no detail about which stores were checked or
    /// why a particular step failed.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An admin-store row matched the identifier definitively but is
    /// deactivated. The only failure the cascade distinguishes.
    #[error("account deactivated")]
    AccountDeactivated,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
