//! In-process HTTP client for the application router
//!
//! Requests go straight through `tower::ServiceExt::oneshot`; cookies set by
//! responses are kept and sent back like a browser would.

use std::collections::BTreeMap;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use classbook::config::{Settings, TeacherGradeScope};
use classbook::database::DatabaseService;
use classbook::{create_router, AppState};
use super::TestDatabase;

pub const TEST_SECRET_KEY: &str = "classbook-integration-tests-signing-secret-0123456789";

/// Settings pointing at a test database, with a valid signing secret
pub fn test_settings(database_url: &str) -> Settings {
    let mut settings = Settings::default();
    settings.server.host = "127.0.0.1".to_string();
    settings.database.url = database_url.to_string();
    settings.auth.secret_key = TEST_SECRET_KEY.to_string();
    settings.grades.teacher_scope = TeacherGradeScope::All;
    settings
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn is_redirect_to(&self, path: &str) -> bool {
        self.status == StatusCode::SEE_OTHER && self.location.as_deref() == Some(path)
    }
}

pub struct TestApp {
    pub database: TestDatabase,
    pub state: AppState,
    router: Router,
    cookies: BTreeMap<String, String>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_settings(|_| {}).await
    }

    /// Build an app whose settings are adjusted before startup
    pub async fn with_settings(adjust: impl FnOnce(&mut Settings)) -> Self {
        let database = TestDatabase::new().await.expect("Failed to create test database");
        let mut settings = test_settings(&database.database_url);
        adjust(&mut settings);

        let state = AppState::new(DatabaseService::new(database.pool.clone()), settings)
            .expect("Failed to build application state");
        let router = create_router(state.clone());

        Self {
            database,
            state,
            router,
            cookies: BTreeMap::new(),
        }
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = self.request(Method::GET, path)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(name, value)| format!("{}={}", urlencoding::encode(name), urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        let request = self.request(Method::POST, path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Value of a stored cookie, still carrying its signature
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Put a cookie back, e.g. to replay a stale session
    pub fn set_cookie(&mut self, name: &str, value: &str) {
        self.cookies.insert(name.to_string(), value.to_string());
    }

    /// Forget every cookie, as a fresh browser would
    pub fn clear_cookies(&mut self) {
        self.cookies.clear();
    }

    fn request(&self, method: Method, path: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(path);
        if !self.cookies.is_empty() {
            let header_value = self.cookies
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, header_value);
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        for set_cookie in response.headers().get_all(header::SET_COOKIE) {
            let raw = set_cookie.to_str().expect("Non-ASCII set-cookie header");
            let pair = raw.split(';').next().unwrap_or_default();
            if let Some((name, value)) = pair.split_once('=') {
                if value.is_empty() {
                    self.cookies.remove(name.trim());
                } else {
                    self.cookies.insert(name.trim().to_string(), value.to_string());
                }
            }
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        TestResponse {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
