//! Landing and health pages

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::SignedCookieJar;
use serde_json::json;
use crate::models::Principal;
use crate::state::AppState;
use crate::utils::errors::Result;
use super::{page_failure, show_page};

/// Landing page: the teacher's classes, the student's class, or a welcome
pub async fn index(
    State(state): State<AppState>,
    principal: Option<Principal>,
    jar: SignedCookieJar,
) -> Response {
    let data = match principal {
        Some(principal) => match landing_data(&state, &principal).await {
            Ok(data) => data,
            Err(e) => return page_failure(&state, jar, Some(principal), e),
        },
        None => json!({}),
    };

    show_page(&state, jar, principal, "index", "Home", data)
}

async fn landing_data(state: &AppState, principal: &Principal) -> Result<serde_json::Value> {
    let account = state.services.auth_service.account(principal).await?;

    if principal.is_teacher() {
        let classes = state.services.class_service.classes_for_teacher(principal).await?;
        return Ok(json!({ "account": account, "classes": classes }));
    }

    let class = match account.class_id {
        Some(class_id) => state.services.class_service.find_class(class_id).await?,
        None => None,
    };
    Ok(json!({ "account": account, "class": class }))
}

/// `200 ok` while the database answers
pub async fn healthz(State(state): State<AppState>) -> Response {
    let status = state.services.health_check().await;
    if status.is_healthy() {
        (StatusCode::OK, "ok").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, status.get_issues().join("; ")).into_response()
    }
}
