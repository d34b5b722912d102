//! Resolved identity types.
//!
//! An [`Identity`] is the result of a successful resolution: exactly one
//! store matched, the password verified, and the activation rules passed.
//! It is never synthesized from more than one store.

use serde::{Deserialize, Serialize};

use campus_core::{CanonicalRole, DepartmentId, Email};

/// Which credential store an identity was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityKind {
    Admin,
    Faculty,
    Student,
}

impl std::fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Faculty => write!(f, "faculty"),
            Self::Student => write!(f, "student"),
        }
    }
}

/// A resolved identity.
///
/// Produced only by the resolution cascade; every authorization decision
/// downstream (token claims, visibility filtering) consumes this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Store the identity was resolved from.
    pub kind: IdentityKind,
    /// Row ID within that store.
    pub id: i32,
    /// The account's email address.
    pub email: Email,
    /// Canonicalized role string (e.g. `department-admin`, `student`).
    pub role: String,
    /// Department the identity belongs to, if any.
    pub department_id: Option<DepartmentId>,
    /// Department code used for announcement scoping, if any.
    pub department_code: Option<String>,
    /// Always true for a resolved identity; kept explicit so token
    /// consumers never have to guess.
    pub is_active: bool,
}

impl Identity {
    /// The canonical role variant for privilege checks.
    #[must_use]
    pub fn canonical_role(&self) -> CanonicalRole {
        CanonicalRole::parse(&self.role)
    }

    /// Whether this identity belongs to the privileged set that bypasses
    /// visibility filtering.
    #[must_use]
    pub fn is_privileged(&self) -> bool {
        self.canonical_role().is_privileged()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn identity(role: &str) -> Identity {
        Identity {
            kind: IdentityKind::Faculty,
            id: 1,
            email: Email::parse("f@college.edu").unwrap(),
            role: role.to_owned(),
            department_id: Some(DepartmentId::new(3)),
            department_code: Some("CSE".to_owned()),
            is_active: true,
        }
    }

    #[test]
    fn test_privileged_roles() {
        assert!(identity("superadmin").is_privileged());
        assert!(identity("super-admin").is_privileged());
        assert!(identity("executive_admin").is_privileged());
        assert!(!identity("department-admin").is_privileged());
        assert!(!identity("faculty").is_privileged());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&IdentityKind::Faculty).unwrap();
        assert_eq!(json, "\"faculty\"");
    }
}
