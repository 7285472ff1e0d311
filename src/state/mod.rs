//! Shared application state
//!
//! Everything a request handler needs, cloned cheaply into every request.

use std::sync::Arc;
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use crate::config::Settings;
use crate::database::DatabaseService;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::views::Views;

#[derive(Clone, Debug)]
pub struct AppState {
    pub services: ServiceFactory,
    pub views: Arc<Views>,
    pub settings: Arc<Settings>,
    cookie_key: Key,
}

impl AppState {
    /// Build the state from validated settings and a migrated database
    pub fn new(db: DatabaseService, settings: Settings) -> Result<Self> {
        // Key derivation panics on secrets shorter than 32 bytes.
        settings.validate()?;

        let services = ServiceFactory::new(db, &settings);
        let views = Views::new()?;
        let cookie_key = Key::derive_from(settings.auth.secret_key.as_bytes());

        Ok(Self {
            services,
            views: Arc::new(views),
            settings: Arc::new(settings),
            cookie_key,
        })
    }

    pub fn cookie_key(&self) -> Key {
        self.cookie_key.clone()
    }

    pub fn session_cookie(&self) -> &str {
        &self.settings.auth.session_cookie
    }

    pub fn flash_cookie(&self) -> &str {
        &self.settings.auth.flash_cookie
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key()
    }
}
