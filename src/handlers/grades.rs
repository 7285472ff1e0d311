//! Grade handlers

use axum::extract::{Form, State};
use axum::response::Response;
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;
use serde_json::{json, Value};
use crate::models::{Principal, RecordGradeRequest, Role};
use crate::state::AppState;
use crate::utils::errors::{ClassbookError, Result};
use crate::utils::helpers;
use crate::views::Flash;
use super::{form_failure, page_failure, redirect_with, require_role, show_page};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GradeForm {
    pub student_id: String,
    pub subject_id: String,
    pub period: String,
    pub score: String,
}

impl GradeForm {
    fn to_request(&self) -> Result<RecordGradeRequest> {
        let score = self.score.trim().parse::<f64>()
            .map_err(|_| ClassbookError::InvalidInput("Score must be a number".to_string()))?;

        Ok(RecordGradeRequest {
            student_id: helpers::parse_id(&self.student_id, "Student id")?,
            subject_id: helpers::parse_id(&self.subject_id, "Subject id")?,
            period: self.period.clone(),
            score,
        })
    }

    fn to_value(&self) -> Value {
        json!({
            "student_id": self.student_id,
            "subject_id": self.subject_id,
            "period": self.period,
            "score": self.score,
        })
    }
}

/// Grade listing filtered by the caller's role
pub async fn list_grades(
    State(state): State<AppState>,
    principal: Principal,
    jar: SignedCookieJar,
) -> Response {
    match state.services.grade_service.list_grades(&principal).await {
        Ok(grades) => show_page(&state, jar, Some(principal), "grades", "Grades", json!({ "grades": grades })),
        Err(e) => page_failure(&state, jar, Some(principal), e),
    }
}

pub async fn record_grade(
    State(state): State<AppState>,
    principal: Principal,
    jar: SignedCookieJar,
    Form(form): Form<GradeForm>,
) -> Response {
    let jar = match require_role(&state, jar, &principal, Role::Teacher) {
        Ok(jar) => jar,
        Err(response) => return response,
    };

    let result = match form.to_request() {
        Ok(request) => state.services.grade_service.record_grade(&principal, request).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(grade) => redirect_with(
            jar,
            &state,
            "/grades",
            Flash::success(format!("Grade {} recorded for period {}.", grade.score, grade.period)),
        ),
        Err(e) => {
            let grades = match state.services.grade_service.list_grades(&principal).await {
                Ok(grades) => grades,
                Err(list_error) => return page_failure(&state, jar, Some(principal), list_error),
            };
            let data = json!({ "grades": grades, "form": form.to_value() });
            form_failure(&state, jar, Some(principal), e, "grades", "Grades", data)
        }
    }
}
