//! Identity provider port (credential issuance/validation).

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use precocerto_core::UserId;

/// A registered user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub uid: UserId,
    pub email: String,
}

/// An authenticated session.
///
/// The token is opaque to the core; it only attributes actions to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: UserIdentity,
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid email address")]
    InvalidEmail,

    #[error("password must have at least {min_len} characters")]
    WeakPassword { min_len: usize },

    #[error("email already in use")]
    EmailInUse,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Surface of the identity provider the storefront depends on.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<UserIdentity, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;
}

#[derive(Debug, Clone)]
struct Account {
    identity: UserIdentity,
    password: String,
}

/// In-memory identity provider.
///
/// Intended for tests/dev. Mirrors the hosted provider's observable rules:
/// well-formed emails, a minimum password length, unique emails.
#[derive(Debug)]
pub struct InMemoryIdentityProvider {
    accounts: RwLock<HashMap<String, Account>>,
    session_ttl: Duration,
}

impl Default for InMemoryIdentityProvider {
    fn default() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            session_ttl: Duration::hours(1),
        }
    }
}

impl InMemoryIdentityProvider {
    pub const MIN_PASSWORD_LEN: usize = 6;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }
}

fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    let (local, domain) = email.split_once('@').ok_or(AuthError::InvalidEmail)?;
    if local.is_empty() || !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(AuthError::InvalidEmail);
    }
    Ok(email)
}

#[async_trait::async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<UserIdentity, AuthError> {
        let email = normalize_email(email)?;
        if password.chars().count() < Self::MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword {
                min_len: Self::MIN_PASSWORD_LEN,
            });
        }

        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| AuthError::Unavailable("lock poisoned".to_string()))?;
        if accounts.contains_key(&email) {
            return Err(AuthError::EmailInUse);
        }

        let identity = UserIdentity {
            uid: UserId::new(),
            email: email.clone(),
        };
        accounts.insert(
            email,
            Account {
                identity: identity.clone(),
                password: password.to_string(),
            },
        );
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = normalize_email(email).map_err(|_| AuthError::InvalidCredentials)?;
        let accounts = self
            .accounts
            .read()
            .map_err(|_| AuthError::Unavailable("lock poisoned".to_string()))?;

        let account = accounts
            .get(&email)
            .filter(|account| account.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        let issued_at = Utc::now();
        Ok(Session {
            user: account.identity.clone(),
            token: Uuid::now_v7().simple().to_string(),
            issued_at,
            expires_at: issued_at + self.session_ttl,
        })
    }
}
