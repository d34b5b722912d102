//! Announcement repository.
//!
//! Visibility is enforced as a query predicate, not a post-filter: the
//! [`AnnouncementScope`] computed for an identity is translated into the
//! WHERE clause here, so the database only ever returns rows the caller
//! may see.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use campus_core::{AnnouncementId, canonicalize};

use super::RepositoryError;
use crate::models::Announcement;
use crate::services::announcements::{AnnouncementScope, DepartmentScope};

/// Internal row type for announcement queries.
#[derive(Debug, sqlx::FromRow)]
struct AnnouncementRow {
    id: i32,
    title: String,
    message: String,
    target_roles: Vec<String>,
    department_code: Option<String>,
    created_by: i32,
    creator_role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<AnnouncementRow> for Announcement {
    fn from(row: AnnouncementRow) -> Self {
        Self {
            id: AnnouncementId::new(row.id),
            title: row.title,
            message: row.message,
            target_roles: row.target_roles,
            department_code: row.department_code,
            created_by: row.created_by,
            creator_role: row.creator_role,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

const ANNOUNCEMENT_SELECT: &str = r"
    SELECT id, title, message, target_roles, department_code,
           created_by, creator_role, is_active, created_at
    FROM announcement
";

/// Role-membership predicate over `target_roles`.
///
/// Stored spellings are messy (`Department_Admin`, `STUDENT`), so each
/// element is normalized the same way [`canonicalize`] normalizes role
/// strings in Rust: lower-cased, separator runs collapsed to a single
/// hyphen, edge separators trimmed. `$1` must already be canonical.
const ROLE_TARGET_MATCH: &str = r"EXISTS (
    SELECT 1 FROM unnest(target_roles) AS target(role)
    WHERE btrim(lower(regexp_replace(target.role, '[_\s-]+', '-', 'g')), '-') IN ('all', $1)
)";

/// Repository for announcement database operations.
pub struct AnnouncementRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AnnouncementRepository<'a> {
    /// Create a new announcement repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List announcements visible under the given scope, newest first.
    ///
    /// The role test is set membership against normalized `target_roles`
    /// elements (`"all"` wildcard included), so it agrees with
    /// `Announcement::targets_role` on messy stored spellings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_scope(
        &self,
        scope: &AnnouncementScope,
    ) -> Result<Vec<Announcement>, RepositoryError> {
        let rows = match scope {
            AnnouncementScope::Unrestricted => {
                let query = format!(
                    "{ANNOUNCEMENT_SELECT} WHERE is_active = TRUE ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, AnnouncementRow>(&query)
                    .fetch_all(self.pool)
                    .await?
            }
            AnnouncementScope::Scoped { role, department } => match department {
                DepartmentScope::Any => {
                    let query = format!(
                        "{ANNOUNCEMENT_SELECT}
                         WHERE is_active = TRUE
                           AND {ROLE_TARGET_MATCH}
                         ORDER BY created_at DESC"
                    );
                    sqlx::query_as::<_, AnnouncementRow>(&query)
                        .bind(canonicalize(role))
                        .fetch_all(self.pool)
                        .await?
                }
                DepartmentScope::GlobalOnly => {
                    let query = format!(
                        "{ANNOUNCEMENT_SELECT}
                         WHERE is_active = TRUE
                           AND {ROLE_TARGET_MATCH}
                           AND department_code IS NULL
                         ORDER BY created_at DESC"
                    );
                    sqlx::query_as::<_, AnnouncementRow>(&query)
                        .bind(canonicalize(role))
                        .fetch_all(self.pool)
                        .await?
                }
                DepartmentScope::GlobalOrDepartment(code) => {
                    let query = format!(
                        "{ANNOUNCEMENT_SELECT}
                         WHERE is_active = TRUE
                           AND {ROLE_TARGET_MATCH}
                           AND (department_code IS NULL OR department_code = $2)
                         ORDER BY created_at DESC"
                    );
                    sqlx::query_as::<_, AnnouncementRow>(&query)
                        .bind(canonicalize(role))
                        .bind(code)
                        .fetch_all(self.pool)
                        .await?
                }
            },
        };

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List every announcement, active or not, newest first.
    ///
    /// Reserved for the privileged admin listing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Announcement>, RepositoryError> {
        let query = format!("{ANNOUNCEMENT_SELECT} ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, AnnouncementRow>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
