//! Announcement visibility.
//!
//! Visibility is computed once per request as an [`AnnouncementScope`]
//! and then enforced in SQL by the repository. The pure [`AnnouncementScope::allows`]
//! predicate mirrors that SQL exactly so the policy can be tested without
//! a database.

use std::collections::HashSet;

use sqlx::PgPool;

use campus_core::DepartmentId;

use crate::db::{AnnouncementRepository, RepositoryError};
use crate::models::{Announcement, Identity};

/// Department dimension of a scoped visibility filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartmentScope {
    /// No department constraint. Applies to identities without a
    /// department affiliation.
    Any,
    /// Only institution-wide announcements. Applies to identities whose
    /// department is on the exclusion list.
    GlobalOnly,
    /// Institution-wide announcements plus the identity's own department.
    GlobalOrDepartment(String),
}

/// Visibility filter for one identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnouncementScope {
    /// Privileged administrative roles see every active announcement.
    Unrestricted,
    /// Everyone else sees active announcements targeting their role
    /// (or "all"), further narrowed by department.
    Scoped {
        role: String,
        department: DepartmentScope,
    },
}

impl AnnouncementScope {
    /// Compute the scope for an identity.
    ///
    /// Privilege is decided by the identity's canonical role; it is
    /// matched, never rewritten. Identities whose department id appears
    /// in `excluded_departments` are narrowed to institution-wide
    /// announcements only.
    #[must_use]
    pub fn for_identity(identity: &Identity, excluded_departments: &HashSet<DepartmentId>) -> Self {
        if identity.is_privileged() {
            return Self::Unrestricted;
        }

        let department = match identity.department_id {
            Some(id) if excluded_departments.contains(&id) => DepartmentScope::GlobalOnly,
            _ => match &identity.department_code {
                Some(code) => DepartmentScope::GlobalOrDepartment(code.clone()),
                None => DepartmentScope::Any,
            },
        };

        Self::Scoped {
            role: identity.role.clone(),
            department,
        }
    }

    /// Whether an announcement is visible under this scope.
    ///
    /// Must agree with the WHERE clauses in
    /// [`AnnouncementRepository::list_for_scope`].
    #[must_use]
    pub fn allows(&self, announcement: &Announcement) -> bool {
        if !announcement.is_active {
            return false;
        }

        match self {
            Self::Unrestricted => true,
            Self::Scoped { role, department } => {
                if !announcement.targets_role(role) {
                    return false;
                }
                match department {
                    DepartmentScope::Any => true,
                    DepartmentScope::GlobalOnly => announcement.department_code.is_none(),
                    DepartmentScope::GlobalOrDepartment(code) => announcement
                        .department_code
                        .as_ref()
                        .is_none_or(|dept| dept == code),
                }
            }
        }
    }
}

/// Announcement listing service.
pub struct AnnouncementService<'a> {
    pool: &'a PgPool,
    excluded_departments: &'a HashSet<DepartmentId>,
}

impl<'a> AnnouncementService<'a> {
    /// Create a new announcement service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, excluded_departments: &'a HashSet<DepartmentId>) -> Self {
        Self {
            pool,
            excluded_departments,
        }
    }

    /// List the announcements the given identity may see, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_visible(
        &self,
        identity: &Identity,
    ) -> Result<Vec<Announcement>, RepositoryError> {
        let scope = AnnouncementScope::for_identity(identity, self.excluded_departments);
        AnnouncementRepository::new(self.pool)
            .list_for_scope(&scope)
            .await
    }

    /// List every announcement including inactive ones.
    ///
    /// Callers must have already checked privilege; this service does not
    /// re-check it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Announcement>, RepositoryError> {
        AnnouncementRepository::new(self.pool).list_all().await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use campus_core::{AnnouncementId, Email};

    use super::*;
    use crate::models::IdentityKind;

    fn identity(role: &str, department_id: Option<i32>, department_code: Option<&str>) -> Identity {
        Identity {
            kind: IdentityKind::Faculty,
            id: 1,
            email: Email::parse("who@college.edu").unwrap(),
            role: role.to_owned(),
            department_id: department_id.map(DepartmentId::new),
            department_code: department_code.map(str::to_owned),
            is_active: true,
        }
    }

    fn announcement(targets: &[&str], department_code: Option<&str>, is_active: bool) -> Announcement {
        Announcement {
            id: AnnouncementId::new(1),
            title: "Midterm schedule".to_owned(),
            message: "Posted outside the registrar's office.".to_owned(),
            target_roles: targets.iter().map(|s| (*s).to_owned()).collect(),
            department_code: department_code.map(str::to_owned),
            created_by: 1,
            creator_role: "academic-admin".to_owned(),
            is_active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_privileged_roles_get_unrestricted_scope() {
        let excluded = HashSet::new();
        for role in ["superadmin", "super-admin", "executive-admin", "academic-admin"] {
            let scope = AnnouncementScope::for_identity(&identity(role, None, None), &excluded);
            assert_eq!(scope, AnnouncementScope::Unrestricted, "role {role}");
        }
    }

    #[test]
    fn test_department_admin_is_not_privileged() {
        let excluded = HashSet::new();
        let scope = AnnouncementScope::for_identity(
            &identity("department-admin", Some(3), Some("CSE")),
            &excluded,
        );
        assert!(matches!(scope, AnnouncementScope::Scoped { .. }));
    }

    #[test]
    fn test_scoped_role_and_department_match() {
        let excluded = HashSet::new();
        let scope =
            AnnouncementScope::for_identity(&identity("faculty", Some(3), Some("CSE")), &excluded);

        assert!(scope.allows(&announcement(&["faculty"], Some("CSE"), true)));
        assert!(scope.allows(&announcement(&["all"], Some("CSE"), true)));
        assert!(scope.allows(&announcement(&["faculty"], None, true)));
        assert!(!scope.allows(&announcement(&["student"], Some("CSE"), true)));
        assert!(!scope.allows(&announcement(&["faculty"], Some("EEE"), true)));
    }

    #[test]
    fn test_target_roles_match_after_canonicalization() {
        let excluded = HashSet::new();
        let scope = AnnouncementScope::for_identity(&identity("faculty", None, None), &excluded);

        // Stored target spellings are normalized at comparison time.
        assert!(scope.allows(&announcement(&["FACULTY"], None, true)));
        assert!(scope.allows(&announcement(&["All"], None, true)));
    }

    #[test]
    fn test_excluded_department_sees_global_only() {
        let excluded: HashSet<_> = [DepartmentId::new(3)].into();
        let scope =
            AnnouncementScope::for_identity(&identity("faculty", Some(3), Some("CSE")), &excluded);

        assert_eq!(
            scope,
            AnnouncementScope::Scoped {
                role: "faculty".to_owned(),
                department: DepartmentScope::GlobalOnly,
            }
        );
        assert!(scope.allows(&announcement(&["faculty"], None, true)));
        // Even the identity's own department is filtered out.
        assert!(!scope.allows(&announcement(&["faculty"], Some("CSE"), true)));
    }

    #[test]
    fn test_no_department_sees_every_department() {
        let excluded = HashSet::new();
        let scope = AnnouncementScope::for_identity(&identity("faculty", None, None), &excluded);

        assert!(scope.allows(&announcement(&["faculty"], Some("CSE"), true)));
        assert!(scope.allows(&announcement(&["faculty"], Some("EEE"), true)));
        assert!(scope.allows(&announcement(&["faculty"], None, true)));
    }

    #[test]
    fn test_inactive_announcements_hidden_from_everyone() {
        let excluded = HashSet::new();
        let unrestricted =
            AnnouncementScope::for_identity(&identity("superadmin", None, None), &excluded);
        let scoped = AnnouncementScope::for_identity(&identity("student", None, None), &excluded);

        let inactive = announcement(&["all"], None, false);
        assert!(!unrestricted.allows(&inactive));
        assert!(!scoped.allows(&inactive));
    }

    #[test]
    fn test_unrestricted_ignores_targets_and_department() {
        let excluded = HashSet::new();
        let scope =
            AnnouncementScope::for_identity(&identity("executive-admin", None, None), &excluded);

        assert!(scope.allows(&announcement(&["student"], Some("EEE"), true)));
    }
}
