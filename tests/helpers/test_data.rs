//! Test data builders
//!
//! Shortcuts for the form submissions most tests start with.

use super::{TestApp, TestResponse};

pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Register an account through the fixed-role registration page
pub async fn register(app: &mut TestApp, role: &str, username: &str, email: &str) -> TestResponse {
    let path = format!("/register_{}", role);
    app.post_form(&path, &[
        ("username", username),
        ("email", email),
        ("password", TEST_PASSWORD),
    ]).await
}

pub async fn login(app: &mut TestApp, email: &str) -> TestResponse {
    app.post_form("/login", &[("email", email), ("password", TEST_PASSWORD)]).await
}

/// Register and log in, leaving the session cookie in the client
pub async fn sign_up(app: &mut TestApp, role: &str, username: &str, email: &str) {
    let registered = register(app, role, username, email).await;
    assert!(registered.is_redirect_to("/login"), "registration failed: {:?}", registered);

    let logged_in = login(app, email).await;
    assert!(logged_in.is_redirect_to("/"), "login failed: {:?}", logged_in);
}

/// Log out and drop every cookie before acting as someone else
pub async fn switch_user(app: &mut TestApp, email: &str) {
    app.get("/logout").await;
    app.clear_cookies();

    let logged_in = login(app, email).await;
    assert!(logged_in.is_redirect_to("/"), "login failed: {:?}", logged_in);
}
