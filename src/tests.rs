// Handler tests for the Attendance API
// Exercises the full router against a real database

use super::*;
use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;

// ============================================================================
// Test Helpers
// ============================================================================

/// Tests share one database; serialize them so cleanup in one test cannot
/// race inserts in another
static DB_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_purposes";

/// Helper function to create a test database pool
/// Connects to the database, runs migrations, and cleans test data
async fn create_test_pool() -> PgPool {
    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        "postgresql://attendance_user:attendance_pass@db:5432/attendance_db".to_string()
    });

    let pool = crate::db::create_pool(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    // Clean up existing test data, children first
    for table in [
        "attendance_entries",
        "employee_skills",
        "employee_warnings",
        "leave_requests",
        "overtime_requests",
        "accounts",
        "employees",
    ] {
        sqlx::query(&format!("DELETE FROM {}", table))
            .execute(&pool)
            .await
            .expect("Failed to clean test data");
    }

    pool
}

/// Helper function to create a test app with seeded default accounts
async fn create_test_app(pool: PgPool) -> TestServer {
    std::env::set_var("JWT_SECRET", TEST_JWT_SECRET);

    let state = AppState::new(pool, TEST_JWT_SECRET.to_string());
    state
        .auth_service
        .bootstrap_defaults()
        .await
        .expect("Failed to seed default accounts");

    TestServer::new(create_router(state)).unwrap()
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

/// Log in and return the access token
async fn login(server: &TestServer, login_key: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "login_key": login_key, "password": password }))
        .await;

    assert_eq!(
        response.status_code(),
        StatusCode::OK,
        "login failed: {}",
        response.text()
    );

    let body: serde_json::Value = response.json();
    body["access_token"].as_str().unwrap().to_string()
}

async fn admin_token(server: &TestServer) -> String {
    login(server, "admin@example.com", "admin123").await
}

/// Register an employee account as admin and return the account body
async fn register_employee(
    server: &TestServer,
    admin_token: &str,
    email: &str,
    name: &str,
) -> serde_json::Value {
    let response = server
        .post("/api/auth/register")
        .add_header(header::AUTHORIZATION, bearer(admin_token))
        .json(&json!({
            "email": email,
            "password": "password123",
            "role": "employee",
            "name": name
        }))
        .await;

    assert_eq!(
        response.status_code(),
        StatusCode::CREATED,
        "register failed: {}",
        response.text()
    );
    response.json()
}

// ============================================================================
// Bootstrap tests
// ============================================================================

/// Bootstrap on an empty store seeds exactly one admin and one employee;
/// running it again changes nothing
#[tokio::test]
async fn test_bootstrap_is_idempotent() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;

    let state = AppState::new(pool.clone(), TEST_JWT_SECRET.to_string());
    state.auth_service.bootstrap_defaults().await.unwrap();
    state.auth_service.bootstrap_defaults().await.unwrap();

    let accounts: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts")
        .fetch_one(&pool)
        .await
        .unwrap();
    let employees: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM employees")
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(accounts.0, 2);
    assert_eq!(employees.0, 1);
}

// ============================================================================
// Login and token tests
// ============================================================================

/// Bootstrap seeds the documented default accounts; the admin can log in
#[tokio::test]
async fn test_login_success_with_default_admin() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "login_key": "admin@example.com", "password": "admin123" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert_eq!(body["role"], "admin");
    assert_eq!(body["account"]["email"], "admin@example.com");
    // The password hash must never appear in a response
    assert!(body["account"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "login_key": "admin@example.com", "password": "wrong" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

/// Unknown login key and wrong password must be indistinguishable, so the
/// endpoint cannot be used to enumerate accounts
#[tokio::test]
async fn test_login_failures_share_one_message() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({ "login_key": "admin@example.com", "password": "wrong" }))
        .await;
    let unknown_key = server
        .post("/api/auth/login")
        .json(&json!({ "login_key": "nobody@example.com", "password": "wrong" }))
        .await;

    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_key.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.text(), unknown_key.text());
}

#[tokio::test]
async fn test_login_by_staff_id() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let token = admin_token(&server).await;
    let account = register_employee(&server, &token, "ada@example.com", "Ada Lovelace").await;
    let staff_id = account["staff_id"].as_str().unwrap();

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "login_key": staff_id, "password": "password123" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["account"]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_me_returns_calling_account() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let token = admin_token(&server).await;

    let response = server
        .get("/api/auth/me")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["email"], "admin@example.com");
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
async fn test_me_without_token_is_unauthorized() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let response = server.get("/api/auth/me").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Registration tests
// ============================================================================

#[tokio::test]
async fn test_register_requires_admin_role() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let payload = json!({
        "email": "new@example.com",
        "password": "password123",
        "role": "employee",
        "name": "New Person"
    });

    // No token at all
    let response = server.post("/api/auth/register").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    // Employee token
    let employee_token = login(&server, "employee@example.com", "employee123").await;
    let response = server
        .post("/api/auth/register")
        .add_header(header::AUTHORIZATION, bearer(&employee_token))
        .json(&payload)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_duplicate_email_is_conflict() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let token = admin_token(&server).await;
    register_employee(&server, &token, "dup@example.com", "First").await;

    let response = server
        .post("/api/auth/register")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({
            "email": "dup@example.com",
            "password": "password123",
            "role": "employee",
            "name": "Second"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_employee_generates_staff_id_and_record() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let token = admin_token(&server).await;
    let account = register_employee(&server, &token, "grace@example.com", "Grace Hopper").await;

    let staff_id = account["staff_id"].as_str().unwrap();
    assert!(
        crate::validation::validate_staff_id_format(staff_id).is_ok(),
        "unexpected staff id: {}",
        staff_id
    );
    assert!(account["employee_id"].as_i64().is_some());
}

#[tokio::test]
async fn test_register_employee_without_name_is_rejected() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let token = admin_token(&server).await;
    let response = server
        .post("/api/auth/register")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({
            "email": "nameless@example.com",
            "password": "password123",
            "role": "employee"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Clock-in / clock-out tests
// ============================================================================

/// Logging in as an employee flips the clock status as a side effect
#[tokio::test]
async fn test_employee_login_flips_clock_status() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let token = login(&server, "employee@example.com", "employee123").await;

    let response = server
        .get("/api/employees/profile")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["clock_status"], "clocked_in");
}

#[tokio::test]
async fn test_clock_in_when_already_clocked_in_is_conflict() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    // Login already clocked the employee in
    let token = login(&server, "employee@example.com", "employee123").await;

    let response = server
        .post("/api/employees/clock-in")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_clock_out_records_zero_overtime_for_short_session() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let token = login(&server, "employee@example.com", "employee123").await;

    let response = server
        .post("/api/employees/clock-out")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let entry: serde_json::Value = response.json();
    assert_eq!(entry["overtime_minutes"], 0);
    assert!(!entry["clock_out_at"].is_null());

    let profile: serde_json::Value = server
        .get("/api/employees/profile")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await
        .json();
    assert_eq!(profile["clock_status"], "clocked_out");
}

#[tokio::test]
async fn test_clock_out_without_open_session_is_conflict() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let token = login(&server, "employee@example.com", "employee123").await;

    // First clock-out closes the session opened at login
    server
        .post("/api/employees/clock-out")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;

    let response = server
        .post("/api/employees/clock-out")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

/// Admin accounts have no employee record behind them
#[tokio::test]
async fn test_admin_profile_is_not_found() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let token = admin_token(&server).await;
    let response = server
        .get("/api/employees/profile")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Record edit, skill, and warning tests
// ============================================================================

#[tokio::test]
async fn test_update_employee_fields() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let token = admin_token(&server).await;
    let account = register_employee(&server, &token, "lin@example.com", "Lin").await;
    let employee_id = account["employee_id"].as_i64().unwrap();

    let response = server
        .patch(&format!("/api/employees/{}", employee_id))
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({
            "job_schedule": "Mon-Fri 09:00-17:00",
            "leave_days": 20,
            "contract_type": "part_time"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["job_schedule"], "Mon-Fri 09:00-17:00");
    assert_eq!(body["leave_days"], 20);
    assert_eq!(body["contract_type"], "part_time");
    // Untouched fields keep their values
    assert_eq!(body["name"], "Lin");
}

/// Unknown field names are rejected, not reflectively applied
#[tokio::test]
async fn test_update_employee_unknown_field_is_rejected() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let token = admin_token(&server).await;
    let account = register_employee(&server, &token, "zed@example.com", "Zed").await;
    let employee_id = account["employee_id"].as_i64().unwrap();

    let response = server
        .patch(&format!("/api/employees/{}", employee_id))
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({ "salary": 1_000_000 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_employee_requires_admin() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let employee_token = login(&server, "employee@example.com", "employee123").await;

    let response = server
        .patch("/api/employees/1")
        .add_header(header::AUTHORIZATION, bearer(&employee_token))
        .json(&json!({ "leave_days": 200 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_add_skill_and_duplicate_is_conflict() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let token = admin_token(&server).await;
    let account = register_employee(&server, &token, "sam@example.com", "Sam").await;
    let employee_id = account["employee_id"].as_i64().unwrap();

    let response = server
        .post(&format!("/api/employees/{}/skills", employee_id))
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({ "name": "Forklift certified" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = server
        .post(&format!("/api/employees/{}/skills", employee_id))
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({ "name": "Forklift certified" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

/// An empty warning is rejected and nothing reaches the store
#[tokio::test]
async fn test_add_warning_with_empty_text_is_rejected() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let token = admin_token(&server).await;
    let account = register_employee(&server, &token, "kim@example.com", "Kim").await;
    let employee_id = account["employee_id"].as_i64().unwrap();

    let response = server
        .post(&format!("/api/employees/{}/warnings", employee_id))
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({ "reason": "   " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Store unchanged: the employee still has no warnings
    let employee_token = login(&server, "kim@example.com", "password123").await;
    let profile: serde_json::Value = server
        .get("/api/employees/profile")
        .add_header(header::AUTHORIZATION, bearer(&employee_token))
        .await
        .json();
    assert_eq!(profile["warnings"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_add_warning_to_missing_employee_is_not_found() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let token = admin_token(&server).await;
    let response = server
        .post("/api/employees/999999/warnings")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .json(&json!({ "reason": "Ghost employee" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Leave and overtime request tests
// ============================================================================

async fn create_leave(
    server: &TestServer,
    token: &str,
    start: &str,
    end: &str,
) -> serde_json::Value {
    let response = server
        .post("/api/requests/leave")
        .add_header(header::AUTHORIZATION, bearer(token))
        .json(&json!({ "start_date": start, "end_date": end, "reason": "Holiday" }))
        .await;

    assert_eq!(
        response.status_code(),
        StatusCode::CREATED,
        "leave request failed: {}",
        response.text()
    );
    response.json()
}

#[tokio::test]
async fn test_leave_approval_deducts_balance_once() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let admin = admin_token(&server).await;
    let employee = login(&server, "employee@example.com", "employee123").await;

    // Three days inclusive
    let request = create_leave(&server, &employee, "2025-06-02", "2025-06-04").await;
    let request_id = request["id"].as_str().unwrap();

    let response = server
        .patch(&format!("/api/requests/leave/{}/status", request_id))
        .add_header(header::AUTHORIZATION, bearer(&admin))
        .json(&json!({ "status": "approved" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let profile: serde_json::Value = server
        .get("/api/employees/profile")
        .add_header(header::AUTHORIZATION, bearer(&employee))
        .await
        .json();
    assert_eq!(profile["leave_days"], 11);

    // Re-approving is an idempotent no-op: the balance is not deducted again
    let response = server
        .patch(&format!("/api/requests/leave/{}/status", request_id))
        .add_header(header::AUTHORIZATION, bearer(&admin))
        .json(&json!({ "status": "approved" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let profile: serde_json::Value = server
        .get("/api/employees/profile")
        .add_header(header::AUTHORIZATION, bearer(&employee))
        .await
        .json();
    assert_eq!(profile["leave_days"], 11);
}

#[tokio::test]
async fn test_leave_approval_with_insufficient_balance_is_rejected() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let admin = admin_token(&server).await;
    let employee = login(&server, "employee@example.com", "employee123").await;

    // Thirty days against a balance of fourteen
    let request = create_leave(&server, &employee, "2025-06-01", "2025-06-30").await;
    let request_id = request["id"].as_str().unwrap();

    let response = server
        .patch(&format!("/api/requests/leave/{}/status", request_id))
        .add_header(header::AUTHORIZATION, bearer(&admin))
        .json(&json!({ "status": "approved" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Nothing was mutated: balance intact, request still pending
    let profile: serde_json::Value = server
        .get("/api/employees/profile")
        .add_header(header::AUTHORIZATION, bearer(&employee))
        .await
        .json();
    assert_eq!(profile["leave_days"], 14);

    let requests: serde_json::Value = server
        .get("/api/requests/leave")
        .add_header(header::AUTHORIZATION, bearer(&employee))
        .await
        .json();
    assert_eq!(requests[0]["status"], "pending");
}

#[tokio::test]
async fn test_leave_request_with_inverted_dates_is_rejected() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let employee = login(&server, "employee@example.com", "employee123").await;

    let response = server
        .post("/api/requests/leave")
        .add_header(header::AUTHORIZATION, bearer(&employee))
        .json(&json!({
            "start_date": "2025-06-10",
            "end_date": "2025-06-02",
            "reason": "Time travel"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_resolved_request_cannot_change_again() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let admin = admin_token(&server).await;
    let employee = login(&server, "employee@example.com", "employee123").await;

    let request = create_leave(&server, &employee, "2025-06-02", "2025-06-02").await;
    let request_id = request["id"].as_str().unwrap();

    let response = server
        .patch(&format!("/api/requests/leave/{}/status", request_id))
        .add_header(header::AUTHORIZATION, bearer(&admin))
        .json(&json!({ "status": "denied" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // Denied is terminal
    let response = server
        .patch(&format!("/api/requests/leave/{}/status", request_id))
        .add_header(header::AUTHORIZATION, bearer(&admin))
        .json(&json!({ "status": "approved" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_overtime_approval_accrues_minutes() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let admin = admin_token(&server).await;
    let employee = login(&server, "employee@example.com", "employee123").await;

    let response = server
        .post("/api/requests/overtime")
        .add_header(header::AUTHORIZATION, bearer(&employee))
        .json(&json!({
            "work_date": "2025-06-02",
            "minutes": 90,
            "reason": "Inventory count ran late"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let request: serde_json::Value = response.json();

    let response = server
        .patch(&format!(
            "/api/requests/overtime/{}/status",
            request["id"].as_str().unwrap()
        ))
        .add_header(header::AUTHORIZATION, bearer(&admin))
        .json(&json!({ "status": "approved" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let profile: serde_json::Value = server
        .get("/api/employees/profile")
        .add_header(header::AUTHORIZATION, bearer(&employee))
        .await
        .json();
    assert_eq!(profile["overtime_minutes"], 90);
}

#[tokio::test]
async fn test_overtime_request_with_invalid_minutes_is_rejected() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let employee = login(&server, "employee@example.com", "employee123").await;

    let response = server
        .post("/api/requests/overtime")
        .add_header(header::AUTHORIZATION, bearer(&employee))
        .json(&json!({
            "work_date": "2025-06-02",
            "minutes": 0,
            "reason": "Nothing really"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Dashboard tests
// ============================================================================

#[tokio::test]
async fn test_dashboard_requires_admin() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let employee = login(&server, "employee@example.com", "employee123").await;
    let response = server
        .get("/api/admin/dashboard")
        .add_header(header::AUTHORIZATION, bearer(&employee))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_dashboard_aggregates_and_lists() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let admin = admin_token(&server).await;
    // Employee login clocks them in
    login(&server, "employee@example.com", "employee123").await;

    let response = server
        .get("/api/admin/dashboard")
        .add_header(header::AUTHORIZATION, bearer(&admin))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["total_employees"], 1);
    assert_eq!(body["clocked_in"], 1);
    assert_eq!(body["pending_requests"], 0);
    assert_eq!(body["employees"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_dashboard_search_filter() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let admin = admin_token(&server).await;
    register_employee(&server, &admin, "ada2@example.com", "Ada Lovelace").await;
    register_employee(&server, &admin, "bob@example.com", "Bob Tables").await;

    let response = server
        .get("/api/admin/dashboard")
        .add_query_param("search", "lovelace")
        .add_header(header::AUTHORIZATION, bearer(&admin))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    let employees = body["employees"].as_array().unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0]["name"], "Ada Lovelace");
}

#[tokio::test]
async fn test_dashboard_rejects_bad_query_params() {
    let _guard = DB_LOCK.lock().await;
    let pool = create_test_pool().await;
    let server = create_test_app(pool).await;

    let admin = admin_token(&server).await;

    let response = server
        .get("/api/admin/dashboard")
        .add_query_param("sort", "shoe_size")
        .add_header(header::AUTHORIZATION, bearer(&admin))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .get("/api/admin/dashboard")
        .add_query_param("page", "0")
        .add_header(header::AUTHORIZATION, bearer(&admin))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
