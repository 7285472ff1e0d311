//! HTTP handlers module
//!
//! One handler per user action, organized by area:
//! - Registration, login and logout
//! - Class creation, membership and subjects
//! - Grade recording and listing
//! - Landing and health pages

pub mod auth;
pub mod classes;
pub mod grades;
pub mod pages;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use serde_json::{json, Value};
use tracing::debug;
use crate::middleware::log_requests;
use crate::models::{Principal, Role};
use crate::state::AppState;
use crate::utils::errors::ClassbookError;
use crate::views::{Chrome, Flash, FlashKind};

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/healthz", get(pages::healthz))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/register_teacher", get(auth::register_teacher_form).post(auth::register_teacher))
        .route("/register_student", get(auth::register_student_form).post(auth::register_student))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/create_class", get(classes::create_class_form).post(classes::create_class))
        .route("/join_class", get(classes::join_class_form).post(classes::join_class))
        .route("/manage_class/:id", get(classes::manage_class).post(classes::add_subject))
        .route("/grades", get(grades::list_grades).post(grades::record_grade))
        .route("/view_grades", get(grades::list_grades))
        .layer(axum::middleware::from_fn(log_requests))
        .with_state(state)
}

/// Cookie value of a flash message: `kind:url-encoded message`
pub(crate) fn encode_flash(flash: &Flash) -> String {
    format!("{}:{}", flash.kind.as_str(), urlencoding::encode(&flash.message))
}

pub(crate) fn decode_flash(value: &str) -> Option<Flash> {
    let (kind, message) = value.split_once(':')?;
    let kind = match kind {
        "success" => FlashKind::Success,
        "info" => FlashKind::Info,
        "error" => FlashKind::Error,
        _ => return None,
    };
    let message = urlencoding::decode(message).ok()?.into_owned();
    Some(Flash { kind, message })
}

/// Queue a flash message for the next rendered page
pub(crate) fn with_flash(jar: SignedCookieJar, state: &AppState, flash: Flash) -> SignedCookieJar {
    let cookie = Cookie::build((state.flash_cookie().to_string(), encode_flash(&flash)))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/");
    jar.add(cookie)
}

/// Consume the pending flash message, if any
pub(crate) fn take_flash(jar: SignedCookieJar, state: &AppState) -> (SignedCookieJar, Option<Flash>) {
    let flash = match jar.get(state.flash_cookie()) {
        Some(cookie) => decode_flash(cookie.value()),
        None => return (jar, None),
    };
    let jar = jar.remove(Cookie::build((state.flash_cookie().to_string(), "")).path("/"));
    (jar, flash)
}

/// Redirect with a flash message
pub(crate) fn redirect_with(jar: SignedCookieJar, state: &AppState, to: &str, flash: Flash) -> Response {
    (with_flash(jar, state, flash), Redirect::to(to)).into_response()
}

/// Forbidden actions send the caller back to the landing page with a notice
pub(crate) fn deny(jar: SignedCookieJar, state: &AppState, message: &str) -> Response {
    redirect_with(jar, state, "/", Flash::error(message))
}

/// Check the caller's role before showing a role-specific page
pub(crate) fn require_role(
    state: &AppState,
    jar: SignedCookieJar,
    principal: &Principal,
    role: Role,
) -> Result<SignedCookieJar, Response> {
    match state.services.auth_service.require_role(principal, role) {
        Ok(()) => Ok(jar),
        Err(ClassbookError::Forbidden(message)) => Err(deny(jar, state, &message)),
        Err(e) => Err(e.into_response()),
    }
}

/// Render a page; template failures become the generic error page
pub(crate) fn render_page(
    state: &AppState,
    status: StatusCode,
    template: &str,
    title: &str,
    chrome: Chrome,
    data: Value,
) -> Response {
    match state.views.render_page(template, title, chrome, data) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Render a page, consuming the pending flash message
pub(crate) fn show_page(
    state: &AppState,
    jar: SignedCookieJar,
    principal: Option<Principal>,
    template: &str,
    title: &str,
    data: Value,
) -> Response {
    let (jar, flash) = take_flash(jar, state);
    let chrome = Chrome::new(principal, flash);
    (jar, render_page(state, StatusCode::OK, template, title, chrome, data)).into_response()
}

/// Respond to a failed form submission
///
/// Forbidden actions redirect home, caller mistakes re-render the form with
/// the error and a matching status, anything else is a 500.
pub(crate) fn form_failure(
    state: &AppState,
    jar: SignedCookieJar,
    principal: Option<Principal>,
    error: ClassbookError,
    template: &str,
    title: &str,
    data: Value,
) -> Response {
    match error {
        ClassbookError::Forbidden(message) => deny(jar, state, &message),
        e if e.is_user_facing() => {
            debug!(error = %e, template = template, "Form rejected");
            let chrome = Chrome::new(principal, None).with_error(e.to_string());
            (jar, render_page(state, e.status_code(), template, title, chrome, data)).into_response()
        }
        e => e.into_response(),
    }
}

/// Respond to a failed page load: forbidden redirects home, missing
/// entities render the error page, anything else is a 500
pub(crate) fn page_failure(
    state: &AppState,
    jar: SignedCookieJar,
    principal: Option<Principal>,
    error: ClassbookError,
) -> Response {
    match error {
        ClassbookError::Forbidden(message) => deny(jar, state, &message),
        e if e.is_user_facing() => {
            let status = e.status_code();
            let chrome = Chrome::new(principal, None);
            let data = json!({ "status": status.as_u16(), "message": e.to_string() });
            (jar, render_page(state, status, "error", "Error", chrome, data)).into_response()
        }
        e => e.into_response(),
    }
}
