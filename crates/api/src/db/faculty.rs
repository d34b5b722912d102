//! Faculty account repository.
//!
//! Faculty rows carry a role reference because department-admins live in
//! this store as hybrid rows. The repository returns rows as stored; the
//! department-admin exclusion rules are applied by the resolution cascade,
//! which owns that policy.

use sqlx::PgPool;

use campus_core::{AccountStatus, DepartmentId, Email, FacultyId};

use super::RepositoryError;
use crate::models::FacultyAccount;

/// Internal row type for faculty account queries.
#[derive(Debug, sqlx::FromRow)]
struct FacultyAccountRow {
    id: i32,
    email: String,
    college_code: String,
    password_hash: String,
    role_name: String,
    department_id: Option<i32>,
    department_code: Option<String>,
    status: String,
}

impl TryFrom<FacultyAccountRow> for FacultyAccount {
    type Error = RepositoryError;

    fn try_from(row: FacultyAccountRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let status: AccountStatus = row
            .status
            .parse()
            .map_err(RepositoryError::DataCorruption)?;

        Ok(Self {
            id: FacultyId::new(row.id),
            email,
            college_code: row.college_code,
            password_hash: row.password_hash,
            role_name: row.role_name,
            department_id: row.department_id.map(DepartmentId::new),
            department_code: row.department_code,
            status,
        })
    }
}

const FACULTY_SELECT: &str = r"
    SELECT f.id, f.email, f.college_code, f.password_hash, r.role_name,
           f.department_id, d.code AS department_code, f.status
    FROM faculty_account f
    JOIN role r ON r.id = f.role_id
    LEFT JOIN department d ON d.id = f.department_id
";

/// Repository for faculty account database operations.
pub struct FacultyRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FacultyRepository<'a> {
    /// Create a new faculty repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a faculty account by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<FacultyAccount>, RepositoryError> {
        let query = format!("{FACULTY_SELECT} WHERE f.email = $1");
        let row = sqlx::query_as::<_, FacultyAccountRow>(&query)
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Look up a faculty account by email or college code, for directory
    /// display.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<FacultyAccount>, RepositoryError> {
        let query = format!("{FACULTY_SELECT} WHERE f.email = $1 OR f.college_code = $1");
        let row = sqlx::query_as::<_, FacultyAccountRow>(&query)
            .bind(identifier)
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Replace a faculty account's password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_password(
        &self,
        id: FacultyId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE faculty_account
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
