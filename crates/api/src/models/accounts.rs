//! Account domain types for the three credential stores.
//!
//! These are validated domain objects; the raw database rows live in the
//! repository modules and convert into these via `TryFrom`.

use serde::Serialize;

use campus_core::{AccountStatus, AdminId, DepartmentId, Email, FacultyId, StudentId};

/// An administrative account.
///
/// `role_name` is the joined value from the role lookup table, stored with
/// whatever spelling the database has; canonicalize before comparing.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub id: AdminId,
    pub email: Email,
    pub password_hash: String,
    pub role_name: String,
    pub is_active: bool,
}

/// A faculty account.
///
/// A faculty row whose role resolves to department-admin is a hybrid: it
/// satisfies department-admin semantics but lives in this store.
#[derive(Debug, Clone)]
pub struct FacultyAccount {
    pub id: FacultyId,
    pub email: Email,
    pub college_code: String,
    pub password_hash: String,
    pub role_name: String,
    pub department_id: Option<DepartmentId>,
    pub department_code: Option<String>,
    pub status: AccountStatus,
}

/// A student account.
#[derive(Debug, Clone)]
pub struct StudentAccount {
    pub id: StudentId,
    pub student_number: String,
    pub email: Email,
    pub password_hash: String,
    pub department_id: Option<DepartmentId>,
    pub department_code: Option<String>,
    pub status: AccountStatus,
}

/// Public directory view of a faculty member.
///
/// Deliberately has no password field; department-admin rows are excluded
/// from directory lookups before this type is ever built.
#[derive(Debug, Clone, Serialize)]
pub struct FacultyProfile {
    pub id: FacultyId,
    pub email: Email,
    pub college_code: String,
    pub role: String,
    pub department_code: Option<String>,
    pub status: AccountStatus,
}

impl From<FacultyAccount> for FacultyProfile {
    fn from(account: FacultyAccount) -> Self {
        Self {
            id: account.id,
            email: account.email,
            college_code: account.college_code,
            role: campus_core::canonicalize(&account.role_name),
            department_code: account.department_code,
            status: account.status,
        }
    }
}

/// Public directory view of a student.
#[derive(Debug, Clone, Serialize)]
pub struct StudentProfile {
    pub id: StudentId,
    pub student_number: String,
    pub email: Email,
    pub department_code: Option<String>,
    pub status: AccountStatus,
}

impl From<StudentAccount> for StudentProfile {
    fn from(account: StudentAccount) -> Self {
        Self {
            id: account.id,
            student_number: account.student_number,
            email: account.email,
            department_code: account.department_code,
            status: account.status,
        }
    }
}
