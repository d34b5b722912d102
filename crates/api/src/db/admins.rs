//! Admin account repository.
//!
//! The admin store keys accounts by email and resolves role names through
//! the `role` lookup table. Role names are stored with whatever spelling
//! they were created with; callers canonicalize before comparing.

use sqlx::PgPool;

use campus_core::{AdminId, Email};

use super::RepositoryError;
use crate::models::AdminAccount;

/// Internal row type for admin account queries.
#[derive(Debug, sqlx::FromRow)]
struct AdminAccountRow {
    id: i32,
    email: String,
    password_hash: String,
    role_name: String,
    is_active: bool,
}

impl TryFrom<AdminAccountRow> for AdminAccount {
    type Error = RepositoryError;

    fn try_from(row: AdminAccountRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: AdminId::new(row.id),
            email,
            password_hash: row.password_hash,
            role_name: row.role_name,
            is_active: row.is_active,
        })
    }
}

/// Repository for admin account database operations.
pub struct AdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminRepository<'a> {
    /// Create a new admin repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up an admin account by email, joining its role name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<AdminAccount>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminAccountRow>(
            r"
            SELECT a.id, a.email, a.password_hash, r.role_name, a.is_active
            FROM admin_account a
            JOIN role r ON r.id = a.role_id
            WHERE a.email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Replace an admin account's password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_password(
        &self,
        id: AdminId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE admin_account
            SET password_hash = $1
            WHERE id = $2
            ",
        )
        .bind(password_hash)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
