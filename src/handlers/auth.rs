//! Registration, login and logout handlers

use axum::extract::{Form, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use crate::models::{Principal, RegisterRequest, Role};
use crate::state::AppState;
use crate::views::Flash;
use super::{form_failure, redirect_with, show_page, with_flash};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub role: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

fn register_title(fixed_role: Option<Role>) -> &'static str {
    match fixed_role {
        Some(Role::Teacher) => "Register as a teacher",
        Some(Role::Student) => "Register as a student",
        None => "Register",
    }
}

fn register_action(fixed_role: Option<Role>) -> &'static str {
    match fixed_role {
        Some(Role::Teacher) => "/register_teacher",
        Some(Role::Student) => "/register_student",
        None => "/register",
    }
}

// The password is never echoed back into the form.
fn register_data(fixed_role: Option<Role>, form: &RegisterForm) -> Value {
    json!({
        "action": register_action(fixed_role),
        "fixed_role": fixed_role.map(|role| role.as_str()),
        "form": {
            "role": form.role,
            "username": form.username,
            "email": form.email,
        },
    })
}

fn show_register(state: &AppState, jar: SignedCookieJar, principal: Option<Principal>, fixed_role: Option<Role>) -> Response {
    let data = register_data(fixed_role, &RegisterForm::default());
    show_page(state, jar, principal, "register", register_title(fixed_role), data)
}

async fn submit_register(
    state: &AppState,
    jar: SignedCookieJar,
    principal: Option<Principal>,
    fixed_role: Option<Role>,
    form: RegisterForm,
) -> Response {
    let role = match fixed_role {
        Some(role) => Ok(role),
        None => form.role.parse::<Role>(),
    };

    let result = match role {
        Ok(role) => {
            state.services.auth_service.register(RegisterRequest {
                role,
                username: form.username.clone(),
                email: form.email.clone(),
                password: form.password.clone(),
            }).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(account) => {
            info!(account_id = account.id, role = %account.role, "Account registered over HTTP");
            redirect_with(jar, state, "/login", Flash::success("Registration successful. Please log in."))
        }
        Err(e) => form_failure(
            state,
            jar,
            principal,
            e,
            "register",
            register_title(fixed_role),
            register_data(fixed_role, &form),
        ),
    }
}

pub async fn register_form(
    State(state): State<AppState>,
    principal: Option<Principal>,
    jar: SignedCookieJar,
) -> Response {
    show_register(&state, jar, principal, None)
}

pub async fn register(
    State(state): State<AppState>,
    principal: Option<Principal>,
    jar: SignedCookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    submit_register(&state, jar, principal, None, form).await
}

pub async fn register_teacher_form(
    State(state): State<AppState>,
    principal: Option<Principal>,
    jar: SignedCookieJar,
) -> Response {
    show_register(&state, jar, principal, Some(Role::Teacher))
}

pub async fn register_teacher(
    State(state): State<AppState>,
    principal: Option<Principal>,
    jar: SignedCookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    submit_register(&state, jar, principal, Some(Role::Teacher), form).await
}

pub async fn register_student_form(
    State(state): State<AppState>,
    principal: Option<Principal>,
    jar: SignedCookieJar,
) -> Response {
    show_register(&state, jar, principal, Some(Role::Student))
}

pub async fn register_student(
    State(state): State<AppState>,
    principal: Option<Principal>,
    jar: SignedCookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    submit_register(&state, jar, principal, Some(Role::Student), form).await
}

pub async fn login_form(
    State(state): State<AppState>,
    principal: Option<Principal>,
    jar: SignedCookieJar,
) -> Response {
    show_page(&state, jar, principal, "login", "Log in", json!({}))
}

/// Verify credentials, store the session token in the signed session cookie
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.services.auth_service.login(&form.email, &form.password).await {
        Ok((session, _)) => {
            let cookie = Cookie::build((state.session_cookie().to_string(), session.token))
                .http_only(true)
                .same_site(SameSite::Lax)
                .path("/");
            redirect_with(jar.add(cookie), &state, "/", Flash::success("Logged in."))
        }
        Err(e) => form_failure(
            &state,
            jar,
            None,
            e,
            "login",
            "Log in",
            json!({ "form": { "email": form.email } }),
        ),
    }
}

/// Close the session and clear its cookie; works without a session too
pub async fn logout(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let token = jar.get(state.session_cookie()).map(|cookie| cookie.value().to_string());
    if let Err(e) = state.services.auth_service.logout(token.as_deref()).await {
        return e.into_response();
    }

    let jar = jar.remove(Cookie::build((state.session_cookie().to_string(), "")).path("/"));
    (with_flash(jar, &state, Flash::info("You have been logged out.")), Redirect::to("/")).into_response()
}
