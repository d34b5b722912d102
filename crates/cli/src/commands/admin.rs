//! Admin account provisioning.
//!
//! # Usage
//!
//! ```bash
//! campus-cli admin create -e registrar@college.edu -p <password> -r academic_admin
//! ```
//!
//! # Environment Variables
//!
//! - `CAMPUS_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

use campus_core::Email;

use super::{CommandError, connect};

/// Create a new admin account.
///
/// The role must already exist in the role table; roles are looked up,
/// never created implicitly.
///
/// # Arguments
///
/// * `email` - Admin's email address
/// * `password` - Initial password (hashed before storage)
/// * `role` - Role name, matched against the role table as stored
///
/// # Returns
///
/// The ID of the created admin account.
///
/// # Errors
///
/// Returns `CommandError` if validation fails, the role is unknown, or an
/// account with the email already exists.
pub async fn create_account(email: &str, password: &str, role: &str) -> Result<i32, CommandError> {
    let email = Email::parse(email).map_err(|e| CommandError::InvalidEmail(e.to_string()))?;

    let pool = connect().await?;

    tracing::info!("Creating admin account: {} ({})", email, role);

    let role_id: Option<i32> = sqlx::query_scalar("SELECT id FROM role WHERE role_name = $1")
        .bind(role)
        .fetch_optional(&pool)
        .await?;
    let role_id = role_id.ok_or_else(|| CommandError::UnknownRole(role.to_owned()))?;

    let existing: Option<i32> = sqlx::query_scalar("SELECT id FROM admin_account WHERE email = $1")
        .bind(email.as_str())
        .fetch_optional(&pool)
        .await?;
    if existing.is_some() {
        return Err(CommandError::AccountExists(email.to_string()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| CommandError::PasswordHash)?
        .to_string();

    let account_id: i32 = sqlx::query_scalar(
        "INSERT INTO admin_account (email, password_hash, role_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(email.as_str())
    .bind(&password_hash)
    .bind(role_id)
    .fetch_one(&pool)
    .await?;

    tracing::info!(
        "Admin account created successfully! ID: {}, Email: {}, Role: {}",
        account_id,
        email,
        role
    );

    Ok(account_id)
}
