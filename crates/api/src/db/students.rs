//! Student account repository.
//!
//! Students may be looked up by student number or email; the same query
//! backs both the login cascade and the public directory endpoint.

use sqlx::PgPool;

use campus_core::{AccountStatus, DepartmentId, Email, StudentId};

use super::RepositoryError;
use crate::models::StudentAccount;

/// Internal row type for student account queries.
#[derive(Debug, sqlx::FromRow)]
struct StudentAccountRow {
    id: i32,
    student_number: String,
    email: String,
    password_hash: String,
    department_id: Option<i32>,
    department_code: Option<String>,
    status: String,
}

impl TryFrom<StudentAccountRow> for StudentAccount {
    type Error = RepositoryError;

    fn try_from(row: StudentAccountRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let status: AccountStatus = row
            .status
            .parse()
            .map_err(RepositoryError::DataCorruption)?;

        Ok(Self {
            id: StudentId::new(row.id),
            student_number: row.student_number,
            email,
            password_hash: row.password_hash,
            department_id: row.department_id.map(DepartmentId::new),
            department_code: row.department_code,
            status,
        })
    }
}

/// Repository for student account database operations.
pub struct StudentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StudentRepository<'a> {
    /// Create a new student repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a student account by student number or email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<StudentAccount>, RepositoryError> {
        let row = sqlx::query_as::<_, StudentAccountRow>(
            r"
            SELECT s.id, s.student_number, s.email, s.password_hash,
                   s.department_id, d.code AS department_code, s.status
            FROM student_account s
            LEFT JOIN department d ON d.id = s.department_id
            WHERE s.student_number = $1 OR s.email = $1
            ",
        )
        .bind(identifier)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Replace a student account's password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_password(
        &self,
        id: StudentId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE student_account
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
