//! Class handlers: creation, joining and the teacher's class page

use axum::extract::{Form, Path, State};
use axum::response::Response;
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;
use crate::models::{ClassOverview, Principal, Role};
use crate::state::AppState;
use crate::utils::errors::ClassbookError;
use crate::utils::helpers;
use crate::views::Flash;
use super::{form_failure, page_failure, redirect_with, require_role, show_page};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateClassForm {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JoinClassForm {
    pub class_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubjectForm {
    pub name: String,
}

pub async fn create_class_form(
    State(state): State<AppState>,
    principal: Principal,
    jar: SignedCookieJar,
) -> Response {
    let jar = match require_role(&state, jar, &principal, Role::Teacher) {
        Ok(jar) => jar,
        Err(response) => return response,
    };
    show_page(&state, jar, Some(principal), "create_class", "Create a class", json!({}))
}

pub async fn create_class(
    State(state): State<AppState>,
    principal: Principal,
    jar: SignedCookieJar,
    Form(form): Form<CreateClassForm>,
) -> Response {
    match state.services.class_service.create_class(&principal, &form.name).await {
        Ok(class) => redirect_with(
            jar,
            &state,
            "/",
            Flash::success(format!("Class {} created with id {}.", class.name, class.id)),
        ),
        Err(e) => form_failure(
            &state,
            jar,
            Some(principal),
            e,
            "create_class",
            "Create a class",
            json!({ "form": { "name": form.name } }),
        ),
    }
}

async fn join_data(state: &AppState, form: &JoinClassForm) -> Value {
    let classes = match state.services.class_service.list_classes().await {
        Ok(classes) => classes,
        Err(e) => {
            warn!(error = %e, "Could not list classes for the join form");
            Vec::new()
        }
    };
    json!({ "classes": classes, "form": { "class_id": form.class_id } })
}

pub async fn join_class_form(
    State(state): State<AppState>,
    principal: Principal,
    jar: SignedCookieJar,
) -> Response {
    let jar = match require_role(&state, jar, &principal, Role::Student) {
        Ok(jar) => jar,
        Err(response) => return response,
    };
    let data = join_data(&state, &JoinClassForm::default()).await;
    show_page(&state, jar, Some(principal), "join_class", "Join a class", data)
}

pub async fn join_class(
    State(state): State<AppState>,
    principal: Principal,
    jar: SignedCookieJar,
    Form(form): Form<JoinClassForm>,
) -> Response {
    let jar = match require_role(&state, jar, &principal, Role::Student) {
        Ok(jar) => jar,
        Err(response) => return response,
    };

    let result = match helpers::parse_id(&form.class_id, "Class id") {
        Ok(class_id) => state.services.class_service.join_class(&principal, class_id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(account) => {
            let class_id = account.class_id.unwrap_or_default();
            redirect_with(jar, &state, "/", Flash::success(format!("You joined class {}.", class_id)))
        }
        Err(e) => {
            let data = join_data(&state, &form).await;
            form_failure(&state, jar, Some(principal), e, "join_class", "Join a class", data)
        }
    }
}

fn overview_data(overview: &ClassOverview, form: &SubjectForm) -> Value {
    json!({
        "class": overview.class,
        "subjects": overview.subjects,
        "students": overview.students,
        "form": { "name": form.name },
    })
}

/// Class page for its owner: subjects, enrolled students, grade entry
pub async fn manage_class(
    State(state): State<AppState>,
    principal: Principal,
    jar: SignedCookieJar,
    Path(class_id): Path<i64>,
) -> Response {
    match state.services.class_service.manage_class(&principal, class_id).await {
        Ok(overview) => {
            let title = overview.class.name.clone();
            let data = overview_data(&overview, &SubjectForm::default());
            show_page(&state, jar, Some(principal), "manage_class", &title, data)
        }
        Err(e) => page_failure(&state, jar, Some(principal), e),
    }
}

/// Add a subject to the class and come back to the class page
pub async fn add_subject(
    State(state): State<AppState>,
    principal: Principal,
    jar: SignedCookieJar,
    Path(class_id): Path<i64>,
    Form(form): Form<SubjectForm>,
) -> Response {
    let error = match state.services.class_service.create_subject(&principal, class_id, &form.name).await {
        Ok(subject) => {
            let to = format!("/manage_class/{}", class_id);
            return redirect_with(jar, &state, &to, Flash::success(format!("Subject {} added.", subject.name)));
        }
        Err(e) => e,
    };

    // Bad input re-renders the class page; ownership and existence problems do not.
    if !matches!(error, ClassbookError::InvalidInput(_)) {
        return page_failure(&state, jar, Some(principal), error);
    }
    match state.services.class_service.manage_class(&principal, class_id).await {
        Ok(overview) => {
            let title = overview.class.name.clone();
            let data = overview_data(&overview, &form);
            form_failure(&state, jar, Some(principal), error, "manage_class", &title, data)
        }
        Err(e) => page_failure(&state, jar, Some(principal), e),
    }
}
