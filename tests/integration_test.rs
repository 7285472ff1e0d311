//! Integration tests for startup wiring, registration and login forms

mod helpers;

use axum::http::StatusCode;
use classbook::config::Settings;
use classbook::database::DatabaseService;
use classbook::AppState;
use helpers::*;

#[tokio::test]
async fn test_infrastructure_setup() {
    let database = TestDatabase::new().await.expect("Failed to create test database");
    for table in ["accounts", "classes", "subjects", "grades", "sessions"] {
        assert_eq!(database.count_records(table).await.unwrap(), 0, "table {}", table);
    }
}

#[tokio::test]
async fn test_health_endpoint() {
    let mut app = TestApp::new().await;
    let response = app.get("/healthz").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_state_refuses_a_short_secret() {
    let database = TestDatabase::new().await.unwrap();
    let mut settings: Settings = test_settings(&database.database_url);
    settings.auth.secret_key = "too-short".to_string();

    assert!(AppState::new(DatabaseService::new(database.pool.clone()), settings).is_err());
}

#[tokio::test]
async fn test_public_pages_render() {
    let mut app = TestApp::new().await;
    for path in ["/", "/register", "/register_teacher", "/register_student", "/login"] {
        let response = app.get(path).await;
        assert_eq!(response.status, StatusCode::OK, "{}", path);
        assert!(response.body.contains("Classbook"), "{}", path);
    }
}

#[tokio::test]
async fn test_registration_form_errors() {
    let mut app = TestApp::new().await;

    let first = register(&mut app, "teacher", "t1", "t1@example.com").await;
    assert!(first.is_redirect_to("/login"));

    let duplicate_email = register(&mut app, "student", "someone", "t1@example.com").await;
    assert_eq!(duplicate_email.status, StatusCode::CONFLICT);
    assert!(duplicate_email.body.contains("t1@example.com already exists"));

    let duplicate_username = register(&mut app, "student", "t1", "other@example.com").await;
    assert_eq!(duplicate_username.status, StatusCode::CONFLICT);

    let bad_email = register(&mut app, "student", "s1", "not-an-email").await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);

    let bad_role = app.post_form("/register", &[
        ("role", "principal"),
        ("username", "p1"),
        ("email", "p1@example.com"),
        ("password", TEST_PASSWORD),
    ]).await;
    assert_eq!(bad_role.status, StatusCode::BAD_REQUEST);

    assert_eq!(app.database.count_records("accounts").await.unwrap(), 1);
}

#[tokio::test]
async fn test_generic_register_form_keeps_the_chosen_role() {
    let mut app = TestApp::new().await;
    let response = app.post_form("/register", &[
        ("role", "student"),
        ("username", "s1"),
        ("email", "s1@example.com"),
        ("password", TEST_PASSWORD),
    ]).await;
    assert!(response.is_redirect_to("/login"));

    login(&mut app, "s1@example.com").await;
    let home = app.get("/").await;
    assert!(home.body.contains("/join_class"));
    assert!(!home.body.contains("/create_class"));
}

#[tokio::test]
async fn test_login_failures() {
    let mut app = TestApp::new().await;
    register(&mut app, "student", "s1", "s1@example.com").await;

    let wrong_password = app.post_form("/login", &[("email", "s1@example.com"), ("password", "nope")]).await;
    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert!(wrong_password.body.contains("Invalid email or password"));

    let unknown = login(&mut app, "nobody@example.com").await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);

    assert_eq!(app.database.count_records("sessions").await.unwrap(), 0);
    assert!(app.cookie(app.state.session_cookie()).is_none());
}

#[tokio::test]
async fn test_join_of_missing_class() {
    let mut lax = TestApp::new().await;
    sign_up(&mut lax, "student", "s1", "s1@example.com").await;
    assert!(lax.post_form("/join_class", &[("class_id", "999")]).await.is_redirect_to("/"));
    let student_id = lax.database.account_id("s1@example.com").await.unwrap();
    assert_eq!(lax.database.membership(student_id).await.unwrap(), Some(999));

    let mut strict = TestApp::with_settings(|settings| settings.classes.strict_join = true).await;
    sign_up(&mut strict, "student", "s1", "s1@example.com").await;
    let rejected = strict.post_form("/join_class", &[("class_id", "999")]).await;
    assert_eq!(rejected.status, StatusCode::NOT_FOUND);

    let malformed = strict.post_form("/join_class", &[("class_id", "nine")]).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_class_name_is_rejected() {
    let mut app = TestApp::new().await;
    sign_up(&mut app, "teacher", "t1", "t1@example.com").await;

    let response = app.post_form("/create_class", &[("name", "   ")]).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("Class name is required"));
    assert_eq!(app.database.count_records("classes").await.unwrap(), 0);
}
