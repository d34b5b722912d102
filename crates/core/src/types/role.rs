//! Role canonicalization.
//!
//! Role names arrive from three different stores with inconsistent
//! spellings: underscores, hyphens, mixed case, and fused words
//! (`superadmin` vs `super-admin`). Every comparison in the identity
//! cascade and the visibility filter goes through this module instead of
//! comparing raw strings.
//!
//! Canonicalization never rewrites a stored value; it only normalizes for
//! matching. Callers that need to query the database for a synonym family
//! must query both literal variants themselves.

use serde::{Deserialize, Serialize};

/// Canonicalize a free-form role string for comparison.
///
/// Lower-cases the input and collapses runs of underscores, whitespace,
/// and hyphens into a single hyphen. Leading and trailing separators are
/// dropped. Total over any input; the empty string canonicalizes to the
/// empty string, which matches nothing.
///
/// ```
/// use campus_core::canonicalize;
///
/// assert_eq!(canonicalize("Department_Admin"), "department-admin");
/// assert_eq!(canonicalize("  Academic  Admin "), "academic-admin");
/// assert_eq!(canonicalize("superadmin"), "superadmin");
/// assert_eq!(canonicalize(""), "");
/// ```
#[must_use]
pub fn canonicalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_separator = false;

    for c in raw.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            pending_separator = !out.is_empty();
        } else {
            if pending_separator {
                out.push('-');
                pending_separator = false;
            }
            out.extend(c.to_lowercase());
        }
    }

    out
}

/// Whether a role string denotes any administrative role.
///
/// Used by the faculty step of the login cascade: a `requested_role` that
/// does not mention "admin" must never match a department-admin faculty
/// row.
#[must_use]
pub fn mentions_admin(raw: &str) -> bool {
    canonicalize(raw).contains("admin")
}

/// Build an administrative role identifier from a bare role code.
///
/// A code that does not already contain "admin" and is not literally
/// "faculty" or "student" denotes a department-scoped administrative role
/// and gets an "-admin" suffix (`"academic"` becomes `"academic-admin"`).
/// Only used where administrative role identifiers are constructed, never
/// for matching "faculty" or "student".
#[must_use]
pub fn admin_role_code(raw: &str) -> String {
    let code = canonicalize(raw);
    if code.is_empty() || code.contains("admin") || code == "faculty" || code == "student" {
        code
    } else {
        format!("{code}-admin")
    }
}

/// Canonical role identity used for privilege and visibility checks.
///
/// A small closed set: every known spelling maps onto one variant, and
/// anything unrecognized maps to [`CanonicalRole::Unknown`] rather than
/// silently passing through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CanonicalRole {
    /// Platform-wide administrator (`superadmin` / `super-admin`).
    Superadmin,
    /// Executive administrator (`executiveadmin` / `executive-admin`).
    ExecutiveAdmin,
    /// Academic administrator (`academicadmin` / `academic-admin`).
    AcademicAdmin,
    /// Department-scoped administrator. Lives as a hybrid row in the
    /// faculty store.
    DepartmentAdmin,
    /// Regular faculty member.
    Faculty,
    /// Student.
    Student,
    /// Any role string not in the closed set.
    Unknown,
}

impl CanonicalRole {
    /// Parse any spelling of a role string into its canonical variant.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match canonicalize(raw).as_str() {
            "superadmin" | "super-admin" => Self::Superadmin,
            "executiveadmin" | "executive-admin" => Self::ExecutiveAdmin,
            "academicadmin" | "academic-admin" => Self::AcademicAdmin,
            "departmentadmin" | "department-admin" => Self::DepartmentAdmin,
            "faculty" => Self::Faculty,
            "student" => Self::Student,
            _ => Self::Unknown,
        }
    }

    /// Whether this role sees all announcements without role or
    /// department predicates.
    #[must_use]
    pub const fn is_privileged(self) -> bool {
        matches!(
            self,
            Self::Superadmin | Self::ExecutiveAdmin | Self::AcademicAdmin
        )
    }

    /// Whether this is the department-admin role.
    #[must_use]
    pub const fn is_department_admin(self) -> bool {
        matches!(self, Self::DepartmentAdmin)
    }

    /// The canonical spelling used in responses and announcement
    /// targeting.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Superadmin => "superadmin",
            Self::ExecutiveAdmin => "executive-admin",
            Self::AcademicAdmin => "academic-admin",
            Self::DepartmentAdmin => "department-admin",
            Self::Faculty => "faculty",
            Self::Student => "student",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for CanonicalRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
