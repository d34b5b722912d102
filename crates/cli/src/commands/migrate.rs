//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! campus-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `CAMPUS_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)

use super::{CommandError, connect};

/// Run the campus database migrations.
///
/// Migration files live in `crates/api/migrations/` and are embedded at
/// compile time.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration
/// fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running campus migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
