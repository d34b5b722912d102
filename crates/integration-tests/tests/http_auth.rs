//! Router and bearer-token middleware behavior.
//!
//! These tests drive the real router in-process with `tower::ServiceExt`;
//! every request here is rejected (or answered) before any database call,
//! so no `PostgreSQL` is needed.

use std::collections::HashSet;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use campus_api::models::{Identity, IdentityKind};
use campus_api::routes;
use campus_api::services::TokenIssuer;
use campus_core::Email;
use campus_integration_tests::{TEST_TOKEN_SECRET, test_state};
use secrecy::SecretString;

fn identity(role: &str) -> Identity {
    Identity {
        kind: IdentityKind::Faculty,
        id: 1,
        email: Email::parse("f@college.edu").expect("valid email"),
        role: role.to_owned(),
        department_id: None,
        department_code: None,
        is_active: true,
    }
}

async fn body_json(body: Body) -> Value {
    let bytes = to_bytes(body, usize::MAX).await.expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = routes::router(test_state(HashSet::new()));

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_announcements_require_a_token() {
    let app = routes::router(test_state(HashSet::new()));

    let response = app
        .oneshot(
            Request::get("/announcements")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = routes::router(test_state(HashSet::new()));

    let response = app
        .oneshot(
            Request::get("/announcements")
                .header(header::AUTHORIZATION, "Bearer not-a-token")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_wrong_key_is_rejected() {
    let app = routes::router(test_state(HashSet::new()));

    let foreign = TokenIssuer::new(
        SecretString::from("a-completely-different-signing-key!!"),
        3600,
    );
    let token = foreign.issue(&identity("faculty")).expect("token");

    let response = app
        .oneshot(
            Request::get("/announcements")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = routes::router(test_state(HashSet::new()));

    // Same key as the app, but tokens are born expired.
    let stale = TokenIssuer::new(SecretString::from(TEST_TOKEN_SECRET), -60);
    let token = stale.issue(&identity("faculty")).expect("token");

    let response = app
        .oneshot(
            Request::get("/announcements")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], "Token expired");
}

#[tokio::test]
async fn test_admin_listing_forbidden_for_unprivileged_roles() {
    for role in ["faculty", "student", "department-admin"] {
        let app = routes::router(test_state(HashSet::new()));

        let issuer = TokenIssuer::new(SecretString::from(TEST_TOKEN_SECRET), 3600);
        let token = issuer.issue(&identity(role)).expect("token");

        let response = app
            .oneshot(
                Request::get("/announcements/admin")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::FORBIDDEN, "role {role}");
    }
}

#[tokio::test]
async fn test_login_rejects_empty_credentials() {
    let app = routes::router(test_state(HashSet::new()));

    let response = app
        .oneshot(
            Request::post("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"email": "  ", "password": ""}"#))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["success"], false);
}
