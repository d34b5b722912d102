//! Authentication routes.
//!
//! The unified login endpoint accepts credentials for any account kind
//! and delegates to the resolution cascade; handlers stay thin.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::Identity;
use crate::services::AuthService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/student-login", post(student_login))
        .route("/auth/change-password", post(change_password))
        .route("/auth/student-details/{identifier}", get(student_details))
        .route("/auth/faculty-details/{identifier}", get(faculty_details))
}

/// Unified login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Optional role hint; only its admin-ness matters, never its exact
    /// spelling. Clients send either spelling of the key.
    #[serde(default, alias = "requestedRole")]
    pub requested_role: Option<String>,
}

/// Student-only login request.
#[derive(Debug, Deserialize)]
pub struct StudentLoginRequest {
    /// Student number or email.
    #[serde(alias = "studentId")]
    pub student_id: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub identity: Identity,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(alias = "currentPassword")]
    pub current_password: String,
    #[serde(alias = "newPassword")]
    pub new_password: String,
}

/// POST /auth/login - resolve any credential kind to an identity.
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let identifier = request.email.trim();
    if identifier.is_empty() || request.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let stores = state.stores();
    let auth = AuthService::with_timeout_policy(&stores, state.config().lenient_store_timeouts);
    let identity = auth
        .resolve(
            identifier,
            &request.password,
            request.requested_role.as_deref(),
        )
        .await?;

    let token = state.tokens().issue(&identity)?;

    Ok(Json(LoginResponse {
        success: true,
        token,
        identity,
    }))
}

/// POST /auth/student-login - student-scoped login by number or email.
async fn student_login(
    State(state): State<AppState>,
    Json(request): Json<StudentLoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let identifier = request.student_id.trim();
    if identifier.is_empty() || request.password.is_empty() {
        return Err(AppError::BadRequest(
            "Student ID and password are required".to_string(),
        ));
    }

    let stores = state.stores();
    let auth = AuthService::with_timeout_policy(&stores, state.config().lenient_store_timeouts);
    let identity = auth.resolve_student(identifier, &request.password).await?;

    let token = state.tokens().issue(&identity)?;

    Ok(Json(LoginResponse {
        success: true,
        token,
        identity,
    }))
}

/// POST /auth/change-password - change the caller's own password.
async fn change_password(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let stores = state.stores();
    let auth = AuthService::with_timeout_policy(&stores, state.config().lenient_store_timeouts);
    auth.change_password(&identity, &request.current_password, &request.new_password)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Password updated",
    })))
}

/// GET /auth/student-details/{identifier} - public student profile.
async fn student_details(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let stores = state.stores();
    let auth = AuthService::with_timeout_policy(&stores, state.config().lenient_store_timeouts);
    let profile = auth
        .student_directory(identifier.trim())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("student {identifier}")))?;

    Ok(Json(json!({ "success": true, "data": profile })))
}

/// GET /auth/faculty-details/{identifier} - public faculty profile.
///
/// Department-admin hybrids 404 here exactly like missing rows do.
async fn faculty_details(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let stores = state.stores();
    let auth = AuthService::with_timeout_policy(&stores, state.config().lenient_store_timeouts);
    let profile = auth
        .faculty_directory(identifier.trim())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("faculty {identifier}")))?;

    Ok(Json(json!({ "success": true, "data": profile })))
}
