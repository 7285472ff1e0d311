//! HTML views
//!
//! Handlebars templates embedded in the binary and registered once at startup.

use axum::http::StatusCode;
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::{Map, Value};
use crate::models::Principal;
use crate::utils::errors::{ClassbookError, Result};

const PARTIALS: &[(&str, &str)] = &[
    ("header", include_str!("../../templates/partials/header.hbs")),
    ("footer", include_str!("../../templates/partials/footer.hbs")),
];

const PAGES: &[(&str, &str)] = &[
    ("index", include_str!("../../templates/index.hbs")),
    ("register", include_str!("../../templates/register.hbs")),
    ("login", include_str!("../../templates/login.hbs")),
    ("create_class", include_str!("../../templates/create_class.hbs")),
    ("join_class", include_str!("../../templates/join_class.hbs")),
    ("manage_class", include_str!("../../templates/manage_class.hbs")),
    ("grades", include_str!("../../templates/grades.hbs")),
    ("error", include_str!("../../templates/error.hbs")),
];

/// Kind of a one-shot notice shown after a redirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Info,
    Error,
}

impl FlashKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Info => "info",
            FlashKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Error, message: message.into() }
    }
}

/// Data shared by every page: navigation and notices
#[derive(Debug, Clone, Default)]
pub struct Chrome {
    pub principal: Option<Principal>,
    pub flash: Option<Flash>,
    pub error: Option<String>,
}

impl Chrome {
    pub fn new(principal: Option<Principal>, flash: Option<Flash>) -> Self {
        Self { principal, flash, error: None }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    fn into_value(self, title: &str) -> Result<Value> {
        let mut chrome = Map::new();
        chrome.insert("title".to_string(), Value::from(title));
        if let Some(principal) = self.principal {
            chrome.insert("user".to_string(), serde_json::json!({
                "account_id": principal.account_id,
                "role": principal.role.as_str(),
                "is_teacher": principal.is_teacher(),
            }));
        }
        if let Some(flash) = self.flash {
            chrome.insert("flash".to_string(), serde_json::to_value(flash)?);
        }
        if let Some(error) = self.error {
            chrome.insert("error".to_string(), Value::from(error));
        }
        Ok(Value::Object(chrome))
    }
}

/// Template registry
#[derive(Debug)]
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);

        for (name, source) in PARTIALS {
            registry
                .register_partial(name, *source)
                .map_err(|e| ClassbookError::Template(format!("Error registering partial {:?}: {}", name, e)))?;
        }
        for (name, source) in PAGES {
            registry
                .register_template_string(name, *source)
                .map_err(|e| ClassbookError::Template(format!("Error registering template {:?}: {}", name, e)))?;
        }

        tracing::debug!(templates = PAGES.len(), partials = PARTIALS.len(), "Templates registered");
        Ok(Self { registry })
    }

    /// Render a registered template with arbitrary serializable data
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.registry
            .render(name, data)
            .map_err(|e| ClassbookError::Template(format!("Error rendering template {:?}: {}", name, e)))
    }

    /// Render a page, merging the chrome into the page data
    pub fn render_page(&self, name: &str, title: &str, chrome: Chrome, data: Value) -> Result<String> {
        let mut merged = match chrome.into_value(title)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        if let Value::Object(page) = data {
            merged.extend(page);
        }
        self.render(name, &Value::Object(merged))
    }
}

/// Last-resort error page that does not go through the template registry
pub fn fallback_error_page(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{code} {reason}</title></head>\n\
         <body>\n<h1>{code} {reason}</h1>\n<p>{message}</p>\n<p><a href=\"/\">Back to the start page</a></p>\n</body>\n</html>\n",
        code = status.as_u16(),
        reason = reason,
        message = handlebars::html_escape(message),
    )
}
