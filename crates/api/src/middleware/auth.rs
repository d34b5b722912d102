//! Authentication extractors.
//!
//! Provides extractors for requiring a verified bearer token in route
//! handlers. The token carries the full resolved identity, so no store
//! lookup happens here.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::models::Identity;
use crate::services::TokenError;
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(identity): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", identity.email)
/// }
/// ```
pub struct RequireAuth(pub Identity);

/// Error returned when authentication is required but missing or invalid.
pub enum AuthRejection {
    /// No `Authorization: Bearer` header on the request.
    MissingToken,
    /// Token failed verification.
    InvalidToken,
    /// Token verified but has expired.
    ExpiredToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let message = match self {
            Self::MissingToken => "Missing bearer token",
            Self::InvalidToken => "Invalid token",
            Self::ExpiredToken => "Token expired",
        };
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": message })),
        )
            .into_response()
    }
}

/// Pull and verify the bearer token from the request headers.
fn verify_bearer(parts: &Parts, state: &AppState) -> Result<Identity, AuthRejection> {
    let header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthRejection::MissingToken)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthRejection::MissingToken)?;

    state.tokens().verify(token).map_err(|e| match e {
        TokenError::Expired => AuthRejection::ExpiredToken,
        _ => AuthRejection::InvalidToken,
    })
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        verify_bearer(parts, state).map(Self)
    }
}

/// Extractor that requires a privileged administrative identity.
///
/// Privilege is decided by the canonical role carried in the token;
/// department admins do not qualify.
pub struct RequirePrivileged(pub Identity);

/// Error returned when privileged access is required.
pub enum PrivilegedRejection {
    /// Authentication failed outright.
    Auth(AuthRejection),
    /// Authenticated, but the role is not in the privileged set.
    Forbidden,
}

impl IntoResponse for PrivilegedRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Auth(rejection) => rejection.into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "success": false,
                    "error": "Administrative access required",
                })),
            )
                .into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequirePrivileged {
    type Rejection = PrivilegedRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = verify_bearer(parts, state).map_err(PrivilegedRejection::Auth)?;

        if !identity.is_privileged() {
            return Err(PrivilegedRejection::Forbidden);
        }

        Ok(Self(identity))
    }
}
