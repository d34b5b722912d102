//! Identity resolution.
//!
//! One login endpoint, three disjoint credential stores. The cascade
//! tries Faculty, then Student, then Admin, in that fixed order; the
//! ordering is the tie-break for emails that exist in more than one
//! store. Each step either resolves, disqualifies the whole attempt
//! (admin deactivation only), or falls through to the next step.
//!
//! Falling through is normal control flow here, not an error: a password
//! mismatch against one store does not mean the credentials are invalid
//! overall, because the same email may validly match a later store.

mod error;
mod stores;

pub use error::AuthError;
pub use stores::IdentityStores;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use campus_core::{CanonicalRole, admin_role_code, canonicalize, mentions_admin};

use crate::db::RepositoryError;
use crate::models::{
    AdminAccount, FacultyAccount, FacultyProfile, Identity, IdentityKind, StudentAccount,
    StudentProfile,
};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Identity resolution service.
///
/// Generic over the store seam so the cascade can be exercised against
/// in-memory stores in tests.
pub struct AuthService<'a, S> {
    stores: &'a S,
    lenient_timeouts: bool,
}

impl<'a, S: IdentityStores> AuthService<'a, S> {
    /// Create a new service with lenient timeout handling (a timed-out
    /// store call is treated as a non-match).
    #[must_use]
    pub const fn new(stores: &'a S) -> Self {
        Self {
            stores,
            lenient_timeouts: true,
        }
    }

    /// Create a new service with an explicit timeout policy.
    #[must_use]
    pub const fn with_timeout_policy(stores: &'a S, lenient_timeouts: bool) -> Self {
        Self {
            stores,
            lenient_timeouts,
        }
    }

    // =========================================================================
    // Resolution cascade
    // =========================================================================

    /// Resolve a credential pair to exactly one identity.
    ///
    /// Store lookups are sequenced strictly: a later step is only issued
    /// once the previous step has produced a definitive non-match.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AccountDeactivated` if an admin row matched the
    /// identifier but is deactivated. Returns the uniform
    /// `AuthError::InvalidCredentials` for every other failure.
    pub async fn resolve(
        &self,
        identifier: &str,
        password: &str,
        requested_role: Option<&str>,
    ) -> Result<Identity, AuthError> {
        // Step 1: faculty store. Unless the caller explicitly requested an
        // admin-scoped login, department-admin hybrid rows are excluded so
        // their faculty credentials never authenticate through the generic
        // faculty path.
        let admin_requested = requested_role.is_some_and(mentions_admin);
        if let Some(faculty) = self.step(self.stores.faculty_by_email(identifier).await, "faculty")?
        {
            let excluded = !admin_requested
                && CanonicalRole::parse(&faculty.role_name).is_department_admin();
            // Password first, then status: an inactive match falls through.
            if !excluded
                && verify_password(password, &faculty.password_hash).is_ok()
                && faculty.status.is_active()
            {
                return Ok(faculty_identity(&faculty));
            }
        }

        // Step 2: student store.
        if let Some(identity) = self.try_student(identifier, password).await? {
            return Ok(identity);
        }

        // Step 3: admin store.
        if let Some(admin) = self.step(self.stores.admin_by_email(identifier).await, "admin")? {
            if !admin.is_active {
                // The identifier matched a definitive admin row; this is
                // the one case that never falls through.
                return Err(AuthError::AccountDeactivated);
            }

            if CanonicalRole::parse(&admin.role_name).is_department_admin() {
                // An admin-store department-admin row is never itself a
                // valid resolution target: redirect to the faculty store,
                // this time without the step-1 exclusion.
                let faculty =
                    self.step(self.stores.faculty_by_email(identifier).await, "faculty")?;
                return match faculty {
                    Some(f)
                        if verify_password(password, &f.password_hash).is_ok()
                            && f.status.is_active() =>
                    {
                        Ok(faculty_identity(&f))
                    }
                    _ => Err(AuthError::InvalidCredentials),
                };
            }

            if verify_password(password, &admin.password_hash).is_ok() {
                return Ok(admin_identity(&admin));
            }
        }

        // Step 4: nothing resolved.
        Err(AuthError::InvalidCredentials)
    }

    /// Student-only resolution, accepting a student number or email.
    ///
    /// Reuses the exact password-verification and active-status contract
    /// of the cascade's student step.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on any failure; inactive
    /// students get no deactivation-specific message.
    pub async fn resolve_student(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        self.try_student(identifier, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)
    }

    async fn try_student(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<Option<Identity>, AuthError> {
        let Some(student) =
            self.step(self.stores.student_by_identifier(identifier).await, "student")?
        else {
            return Ok(None);
        };

        if verify_password(password, &student.password_hash).is_ok()
            && student.status.is_active()
        {
            return Ok(Some(student_identity(&student)));
        }

        Ok(None)
    }

    /// Apply the timeout policy to a single store lookup.
    ///
    /// A timed-out call becomes a logged non-match under the lenient
    /// policy, preserving graceful degradation; any other store error
    /// propagates so it surfaces as a server error, never as an
    /// authentication failure.
    fn step<T>(
        &self,
        result: Result<Option<T>, RepositoryError>,
        store: &'static str,
    ) -> Result<Option<T>, AuthError> {
        match result {
            Ok(row) => Ok(row),
            Err(RepositoryError::Timeout) if self.lenient_timeouts => {
                tracing::warn!(store, "store lookup timed out; treating as non-match");
                Ok(None)
            }
            Err(e) => Err(AuthError::Repository(e)),
        }
    }

    // =========================================================================
    // Directory lookups (no password involved)
    // =========================================================================

    /// Look up a student for public profile display.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the store call fails.
    pub async fn student_directory(
        &self,
        identifier: &str,
    ) -> Result<Option<StudentProfile>, AuthError> {
        let student = self.step(self.stores.student_by_identifier(identifier).await, "student")?;
        Ok(student.map(Into::into))
    }

    /// Look up a faculty member for public profile display.
    ///
    /// Department-admin rows are excluded from the match set: the faculty
    /// directory must never reveal admin identities.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the store call fails.
    pub async fn faculty_directory(
        &self,
        identifier: &str,
    ) -> Result<Option<FacultyProfile>, AuthError> {
        let faculty = self.step(self.stores.faculty_by_identifier(identifier).await, "faculty")?;
        Ok(faculty
            .filter(|f| !CanonicalRole::parse(&f.role_name).is_department_admin())
            .map(Into::into))
    }

    // =========================================================================
    // Password change
    // =========================================================================

    /// Change the caller's own password.
    ///
    /// Verifies the current password against the caller's store, then
    /// updates exactly one row by primary key.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the current password is
    /// wrong or the account no longer exists.
    /// Returns `AuthError::WeakPassword` if the new password fails
    /// validation.
    pub async fn change_password(
        &self,
        identity: &Identity,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        validate_password(new_password)?;

        match identity.kind {
            IdentityKind::Admin => {
                let admin = self
                    .step(self.stores.admin_by_email(identity.email.as_str()).await, "admin")?
                    .ok_or(AuthError::InvalidCredentials)?;
                verify_password(current_password, &admin.password_hash)?;
                let hash = hash_password(new_password)?;
                self.stores.update_admin_password(admin.id, &hash).await?;
            }
            IdentityKind::Faculty => {
                let faculty = self
                    .step(
                        self.stores.faculty_by_email(identity.email.as_str()).await,
                        "faculty",
                    )?
                    .ok_or(AuthError::InvalidCredentials)?;
                verify_password(current_password, &faculty.password_hash)?;
                let hash = hash_password(new_password)?;
                self.stores.update_faculty_password(faculty.id, &hash).await?;
            }
            IdentityKind::Student => {
                let student = self
                    .step(
                        self.stores.student_by_identifier(identity.email.as_str()).await,
                        "student",
                    )?
                    .ok_or(AuthError::InvalidCredentials)?;
                verify_password(current_password, &student.password_hash)?;
                let hash = hash_password(new_password)?;
                self.stores.update_student_password(student.id, &hash).await?;
            }
        }

        Ok(())
    }
}

// =============================================================================
// Identity construction
// =============================================================================

fn faculty_identity(account: &FacultyAccount) -> Identity {
    Identity {
        kind: IdentityKind::Faculty,
        id: account.id.as_i32(),
        email: account.email.clone(),
        role: canonicalize(&account.role_name),
        department_id: account.department_id,
        department_code: account.department_code.clone(),
        is_active: true,
    }
}

fn student_identity(account: &StudentAccount) -> Identity {
    Identity {
        kind: IdentityKind::Student,
        id: account.id.as_i32(),
        email: account.email.clone(),
        role: "student".to_owned(),
        department_id: account.department_id,
        department_code: account.department_code.clone(),
        is_active: true,
    }
}

fn admin_identity(account: &AdminAccount) -> Identity {
    Identity {
        kind: IdentityKind::Admin,
        id: account.id.as_i32(),
        email: account.email.clone(),
        // Admin-store roles are administrative by definition; a bare code
        // like "academic" denotes "academic-admin".
        role: admin_role_code(&account.role_name),
        department_id: None,
        department_code: None,
        is_active: true,
    }
}

// =============================================================================
// Password helpers
// =============================================================================

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
