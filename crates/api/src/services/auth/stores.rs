//! The store seam the cascade resolves against.

use campus_core::{AdminId, FacultyId, StudentId};

use crate::db::RepositoryError;
use crate::models::{AdminAccount, FacultyAccount, StudentAccount};

/// The three credential stores, as injected collaborators.
///
/// The cascade calls these strictly one at a time, in priority order; the
/// ordering is the tie-break policy for emails that legitimately exist in
/// more than one store, so implementations must never be raced against
/// each other. Lookups return rows as stored - exclusion and activation
/// policy belongs to [`AuthService`](super::AuthService), not here.
///
/// Implementations may bound each call with a deadline and surface
/// [`RepositoryError::Timeout`]; the cascade decides whether that is a
/// fall-through or a hard failure.
pub trait IdentityStores {
    /// Faculty lookup by email (login path).
    fn faculty_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<FacultyAccount>, RepositoryError>> + Send;

    /// Faculty lookup by email or college code (directory path).
    fn faculty_by_identifier(
        &self,
        identifier: &str,
    ) -> impl Future<Output = Result<Option<FacultyAccount>, RepositoryError>> + Send;

    /// Student lookup by student number or email.
    fn student_by_identifier(
        &self,
        identifier: &str,
    ) -> impl Future<Output = Result<Option<StudentAccount>, RepositoryError>> + Send;

    /// Admin lookup by email.
    fn admin_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<AdminAccount>, RepositoryError>> + Send;

    /// Replace an admin account's password hash.
    fn update_admin_password(
        &self,
        id: AdminId,
        password_hash: &str,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Replace a faculty account's password hash.
    fn update_faculty_password(
        &self,
        id: FacultyId,
        password_hash: &str,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Replace a student account's password hash.
    fn update_student_password(
        &self,
        id: StudentId,
        password_hash: &str,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}
