//! Announcement routes.

use axum::{Json, Router, extract::State, routing::get};
use serde_json::json;

use crate::error::AppError;
use crate::middleware::{RequireAuth, RequirePrivileged};
use crate::services::AnnouncementService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/announcements", get(list_visible))
        .route("/announcements/admin", get(list_all))
}

/// GET /announcements - announcements visible to the caller.
///
/// The caller's scope comes entirely from the verified token; there is no
/// way to request someone else's view.
async fn list_visible(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
) -> Result<Json<serde_json::Value>, AppError> {
    let service = AnnouncementService::new(state.pool(), &state.config().excluded_departments);
    let announcements = service.list_visible(&identity).await?;

    Ok(Json(json!({
        "success": true,
        "count": announcements.len(),
        "data": announcements,
    })))
}

/// GET /announcements/admin - every announcement, including inactive.
async fn list_all(
    State(state): State<AppState>,
    RequirePrivileged(_identity): RequirePrivileged,
) -> Result<Json<serde_json::Value>, AppError> {
    let service = AnnouncementService::new(state.pool(), &state.config().excluded_departments);
    let announcements = service.list_all().await?;

    Ok(Json(json!({
        "success": true,
        "count": announcements.len(),
        "data": announcements,
    })))
}
