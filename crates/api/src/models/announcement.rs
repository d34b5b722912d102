//! Announcement domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use campus_core::{AnnouncementId, canonicalize};

/// An announcement targeted at a set of roles and optionally scoped to a
/// department.
///
/// `target_roles` is a set with contains-semantics, not a single value:
/// an announcement may target several roles at once, and the literal
/// `"all"` targets everyone.
#[derive(Debug, Clone, Serialize)]
pub struct Announcement {
    pub id: AnnouncementId,
    pub title: String,
    pub message: String,
    pub target_roles: Vec<String>,
    /// `None` means global (visible across departments).
    pub department_code: Option<String>,
    pub created_by: i32,
    pub creator_role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Announcement {
    /// Whether this announcement targets the given role.
    ///
    /// Matches on canonicalized spellings and honors the `"all"` wildcard.
    #[must_use]
    pub fn targets_role(&self, role: &str) -> bool {
        let wanted = canonicalize(role);
        self.target_roles.iter().any(|t| {
            let t = canonicalize(t);
            t == "all" || t == wanted
        })
    }
}
