//! Reference data seeding.

use super::{CommandError, connect};

/// Role names seeded into the lookup table.
///
/// New deployments get one consistent spelling per role; existing
/// deployments may carry other spellings, which the API canonicalizes at
/// comparison time.
const ROLE_NAMES: &[&str] = &[
    "superadmin",
    "executive_admin",
    "academic_admin",
    "department_admin",
    "faculty",
    "student",
];

/// Seed the role lookup table.
///
/// Idempotent: existing role names are left untouched.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or an insert
/// fails.
pub async fn roles() -> Result<(), CommandError> {
    let pool = connect().await?;

    for name in ROLE_NAMES {
        sqlx::query("INSERT INTO role (role_name) VALUES ($1) ON CONFLICT (role_name) DO NOTHING")
            .bind(name)
            .execute(&pool)
            .await?;
    }

    tracing::info!("Seeded {} roles", ROLE_NAMES.len());
    Ok(())
}
