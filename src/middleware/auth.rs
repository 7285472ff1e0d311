//! Authentication middleware
//!
//! Resolves the signed session cookie to the `Principal` a request acts as.
//! Handlers that take a `Principal` require a logged-in caller; handlers that
//! take `Option<Principal>` serve anonymous callers too.

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::debug;
use crate::models::Principal;
use crate::state::AppState;
use crate::utils::errors::ClassbookError;

/// Where callers without a valid session are sent
pub const LOGIN_PATH: &str = "/login";

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let jar = SignedCookieJar::from_headers(&parts.headers, state.cookie_key());

        let token = match jar.get(state.session_cookie()) {
            Some(cookie) => cookie.value().to_string(),
            None => {
                debug!(path = %parts.uri.path(), "No session cookie, redirecting to login");
                return Err(ClassbookError::Unauthenticated.into_response());
            }
        };

        match state.services.auth_service.authenticate(&token).await {
            Ok(Some(principal)) => Ok(principal),
            Ok(None) => {
                debug!(path = %parts.uri.path(), "Unknown session token, redirecting to login");
                Err(ClassbookError::Unauthenticated.into_response())
            }
            Err(e) => Err(e.into_response()),
        }
    }
}
