//! Repository behavior against a real database.
//!
//! These tests require a running `PostgreSQL` instance and are ignored by
//! default. Point `CAMPUS_TEST_DATABASE_URL` at a scratch database and run
//! with `--ignored`; each test resets the tables it touches.

use std::collections::HashSet;

use sqlx::PgPool;

use campus_api::models::{Identity, IdentityKind};
use campus_api::db::PgStores;
use campus_api::services::{AnnouncementService, AuthService};
use campus_api::services::auth::hash_password;
use campus_core::Email;

async fn test_pool() -> PgPool {
    let url = std::env::var("CAMPUS_TEST_DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost/campus_test".to_owned());
    let pool = PgPool::connect(&url).await.expect("connect to test database");

    sqlx::migrate!("../api/migrations")
        .run(&pool)
        .await
        .expect("run migrations");

    sqlx::query(
        "TRUNCATE announcement, student_account, faculty_account, admin_account, department, role
         RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await
    .expect("reset tables");

    pool
}

async fn seed_accounts(pool: &PgPool) {
    // Deliberately messy role spellings; the API canonicalizes.
    let faculty_role: i32 =
        sqlx::query_scalar("INSERT INTO role (role_name) VALUES ('Faculty') RETURNING id")
            .fetch_one(pool)
            .await
            .expect("role");
    let dept_admin_role: i32 =
        sqlx::query_scalar("INSERT INTO role (role_name) VALUES ('Department_Admin') RETURNING id")
            .fetch_one(pool)
            .await
            .expect("role");
    let super_role: i32 =
        sqlx::query_scalar("INSERT INTO role (role_name) VALUES ('super admin') RETURNING id")
            .fetch_one(pool)
            .await
            .expect("role");

    let cse: i32 = sqlx::query_scalar(
        "INSERT INTO department (code, name) VALUES ('CSE', 'Computer Science') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .expect("department");

    sqlx::query(
        "INSERT INTO faculty_account
            (email, college_code, password_hash, role_id, department_id)
         VALUES ($1, 'FAC-001', $2, $3, $4)",
    )
    .bind("prof@college.edu")
    .bind(hash_password("faculty-pass").expect("hash"))
    .bind(faculty_role)
    .bind(cse)
    .execute(pool)
    .await
    .expect("faculty");

    sqlx::query(
        "INSERT INTO faculty_account
            (email, college_code, password_hash, role_id, department_id)
         VALUES ($1, 'FAC-002', $2, $3, $4)",
    )
    .bind("head@college.edu")
    .bind(hash_password("head-pass").expect("hash"))
    .bind(dept_admin_role)
    .bind(cse)
    .execute(pool)
    .await
    .expect("dept admin");

    sqlx::query(
        "INSERT INTO student_account (student_number, email, password_hash, department_id)
         VALUES ('S-2024-001', $1, $2, $3)",
    )
    .bind("student@college.edu")
    .bind(hash_password("student-pass").expect("hash"))
    .bind(cse)
    .execute(pool)
    .await
    .expect("student");

    sqlx::query("INSERT INTO admin_account (email, password_hash, role_id) VALUES ($1, $2, $3)")
        .bind("root@college.edu")
        .bind(hash_password("root-pass").expect("hash"))
        .bind(super_role)
        .execute(pool)
        .await
        .expect("admin");
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL (CAMPUS_TEST_DATABASE_URL)"]
async fn test_cascade_against_real_stores() {
    let pool = test_pool().await;
    seed_accounts(&pool).await;

    let stores = PgStores::new(pool.clone(), None);
    let auth = AuthService::new(&stores);

    let faculty = auth
        .resolve("prof@college.edu", "faculty-pass", None)
        .await
        .expect("faculty resolves");
    assert_eq!(faculty.kind, IdentityKind::Faculty);
    assert_eq!(faculty.role, "faculty");
    assert_eq!(faculty.department_code.as_deref(), Some("CSE"));

    // Department-admin hybrid: excluded without the hint, resolves with it.
    assert!(
        auth.resolve("head@college.edu", "head-pass", None)
            .await
            .is_err()
    );
    let head = auth
        .resolve("head@college.edu", "head-pass", Some("department admin"))
        .await
        .expect("resolves with hint");
    assert_eq!(head.role, "department-admin");

    let student = auth
        .resolve_student("S-2024-001", "student-pass")
        .await
        .expect("student resolves");
    assert_eq!(student.kind, IdentityKind::Student);

    let admin = auth
        .resolve("root@college.edu", "root-pass", None)
        .await
        .expect("admin resolves");
    assert_eq!(admin.role, "super-admin");
    assert!(admin.is_privileged());
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL (CAMPUS_TEST_DATABASE_URL)"]
async fn test_directory_lookups_against_real_stores() {
    let pool = test_pool().await;
    seed_accounts(&pool).await;

    let stores = PgStores::new(pool.clone(), None);
    let auth = AuthService::new(&stores);

    let profile = auth
        .faculty_directory("FAC-001")
        .await
        .expect("lookup")
        .expect("found");
    assert_eq!(profile.email.as_str(), "prof@college.edu");

    // Department-admin hybrids are invisible to the directory.
    assert!(auth.faculty_directory("FAC-002").await.expect("lookup").is_none());

    let student = auth
        .student_directory("student@college.edu")
        .await
        .expect("lookup")
        .expect("found");
    assert_eq!(student.student_number, "S-2024-001");
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL (CAMPUS_TEST_DATABASE_URL)"]
async fn test_visibility_filter_runs_in_sql() {
    let pool = test_pool().await;
    seed_accounts(&pool).await;

    // Legacy rows store target spellings with mixed case and underscores;
    // the query must normalize them at comparison time.
    for (title, targets, dept, active) in [
        ("global-for-all", "{all}", None, true),
        ("faculty-only", "{faculty}", None, true),
        ("cse-students", "{student}", Some("CSE"), true),
        ("eee-students", "{student}", Some("EEE"), true),
        ("caps-students", "{STUDENT}", None, true),
        ("heads-meeting", "{Department_Admin}", None, true),
        ("retired", "{all}", None, false),
    ] {
        sqlx::query(
            "INSERT INTO announcement
                (title, message, target_roles, department_code, created_by, creator_role, is_active)
             VALUES ($1, 'body', $2::text[], $3, 1, 'academic-admin', $4)",
        )
        .bind(title)
        .bind(targets)
        .bind(dept)
        .bind(active)
        .execute(&pool)
        .await
        .expect("announcement");
    }

    let excluded = HashSet::new();
    let service = AnnouncementService::new(&pool, &excluded);

    let student = Identity {
        kind: IdentityKind::Student,
        id: 1,
        email: Email::parse("student@college.edu").expect("email"),
        role: "student".to_owned(),
        department_id: None,
        department_code: Some("CSE".to_owned()),
        is_active: true,
    };

    let visible = service.list_visible(&student).await.expect("list");
    let titles: Vec<_> = visible.iter().map(|a| a.title.as_str()).collect();
    assert!(titles.contains(&"global-for-all"));
    assert!(titles.contains(&"cse-students"));
    assert!(titles.contains(&"caps-students"));
    assert!(!titles.contains(&"faculty-only"));
    assert!(!titles.contains(&"heads-meeting"));
    assert!(!titles.contains(&"eee-students"));
    assert!(!titles.contains(&"retired"));

    // A stored `Department_Admin` target matches the canonical role.
    let head = Identity {
        kind: IdentityKind::Faculty,
        id: 2,
        email: Email::parse("head@college.edu").expect("email"),
        role: "department-admin".to_owned(),
        department_id: None,
        department_code: Some("CSE".to_owned()),
        is_active: true,
    };
    let visible = service.list_visible(&head).await.expect("list");
    let titles: Vec<_> = visible.iter().map(|a| a.title.as_str()).collect();
    assert!(titles.contains(&"heads-meeting"));
    assert!(!titles.contains(&"caps-students"));

    // The privileged listing sees everything, including inactive rows.
    let all = service.list_all().await.expect("list all");
    assert_eq!(all.len(), 7);
}
