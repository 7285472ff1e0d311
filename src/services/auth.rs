//! Authentication service implementation
//!
//! This service handles account registration, credential verification,
//! session issuance and role-based access checks.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::{info, warn, debug};
use crate::database::repositories::{AccountRepository, SessionRepository};
use crate::models::{Account, CreateAccountRequest, Principal, RegisterRequest, Role, Session};
use crate::utils::errors::{ClassbookError, Result};
use crate::utils::{helpers, logging};

/// Length of generated session tokens
pub const SESSION_TOKEN_LEN: usize = 48;

/// Hash a password into an argon2 PHC string with a random salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ClassbookError::PasswordHash(e.to_string()))
}

/// Check a password against a stored PHC string
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| ClassbookError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

/// Authentication service for accounts and sessions
#[derive(Clone, Debug)]
pub struct AuthService {
    accounts: AccountRepository,
    sessions: SessionRepository,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(accounts: AccountRepository, sessions: SessionRepository) -> Self {
        Self { accounts, sessions }
    }

    /// Register a new account
    pub async fn register(&self, request: RegisterRequest) -> Result<Account> {
        let username = helpers::required_field(&request.username, "Username")?;
        let email = request.email.trim().to_string();
        if email.is_empty() {
            return Err(ClassbookError::InvalidInput("Email is required".to_string()));
        }
        if !helpers::is_valid_email(&email) {
            return Err(ClassbookError::InvalidInput(format!("{:?} is not a valid email address", email)));
        }
        if request.password.is_empty() {
            return Err(ClassbookError::InvalidInput("Password is required".to_string()));
        }

        debug!(email = %email, role = %request.role, "Attempting to register account");

        if self.accounts.find_by_email(&email).await?.is_some() {
            logging::log_auth_event(&email, "register", false, Some("duplicate email"));
            return Err(ClassbookError::DuplicateEmail { email });
        }
        if self.accounts.find_by_username(&username).await?.is_some() {
            logging::log_auth_event(&email, "register", false, Some("duplicate username"));
            return Err(ClassbookError::DuplicateUsername { username });
        }

        let password_hash = hash_password(&request.password)?;
        let account = self.accounts.create(CreateAccountRequest {
            username,
            email,
            password_hash,
            role: request.role,
        }).await?;

        logging::log_account_action(account.id, "register", Some(account.role.as_str()));
        Ok(account)
    }

    /// Verify credentials and open a session
    pub async fn login(&self, email: &str, password: &str) -> Result<(Session, Principal)> {
        let email = email.trim();
        debug!(email = %email, "Attempting login");

        let account = match self.accounts.find_by_email(email).await? {
            Some(account) => account,
            None => {
                logging::log_auth_event(email, "login", false, Some("unknown email"));
                return Err(ClassbookError::InvalidCredentials);
            }
        };

        if !verify_password(password, &account.password_hash)? {
            logging::log_auth_event(email, "login", false, Some("password mismatch"));
            return Err(ClassbookError::InvalidCredentials);
        }

        let token = helpers::generate_random_string(SESSION_TOKEN_LEN);
        let session = self.sessions.create(&token, account.id, account.role).await?;
        let principal = Principal::from(&session);

        logging::log_auth_event(email, "login", true, None);
        Ok((session, principal))
    }

    /// Close a session; absent or unknown tokens are not an error
    pub async fn logout(&self, token: Option<&str>) -> Result<()> {
        if let Some(token) = token {
            if self.sessions.delete(token).await? {
                info!("Session closed");
            } else {
                debug!("Logout with unknown session token");
            }
        }
        Ok(())
    }

    /// Resolve a session token to the principal it was issued for
    pub async fn authenticate(&self, token: &str) -> Result<Option<Principal>> {
        let session = self.sessions.find(token).await?;
        Ok(session.as_ref().map(Principal::from))
    }

    /// Refuse with `Forbidden` unless the principal has the required role
    pub fn require_role(&self, principal: &Principal, required: Role) -> Result<()> {
        require_role(principal, required)
    }

    /// Account behind a principal
    pub async fn account(&self, principal: &Principal) -> Result<Account> {
        self.accounts
            .find_by_id(principal.account_id)
            .await?
            .ok_or(ClassbookError::AccountNotFound { account_id: principal.account_id })
    }
}

/// Role check shared by every service
pub fn require_role(principal: &Principal, required: Role) -> Result<()> {
    if principal.role != required {
        warn!(
            account_id = principal.account_id,
            role = %principal.role,
            required = %required,
            "Role check failed"
        );
        return Err(ClassbookError::Forbidden(format!("Only a {} can do this", required)));
    }
    Ok(())
}
