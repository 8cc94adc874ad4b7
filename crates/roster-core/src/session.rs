//! # Session Module
//!
//! Session tokens and where they are kept.
//!
//! A token is an opaque presence flag: nothing here validates, expires or
//! refreshes it. Login trusts any non-empty credentials.

use crate::{Result, RosterError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Mutex, PoisonError};

// =============================================================================
// SESSION TOKEN
// =============================================================================

/// Opaque session token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a token string, trimming surrounding whitespace.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(RosterError::EmptyToken);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// CREDENTIALS
// =============================================================================

/// Login form input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check that both fields are filled in. Nothing else is verified.
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(RosterError::MissingEmail);
        }
        if self.password.is_empty() {
            return Err(RosterError::MissingPassword);
        }
        Ok(())
    }
}

// =============================================================================
// TOKEN STORE
// =============================================================================

/// Local storage for a single session token.
pub trait TokenStore {
    /// The stored token, if any.
    fn load(&self) -> Result<Option<SessionToken>>;

    /// Store `token`, replacing any previous one.
    fn save(&self, token: &SessionToken) -> Result<()>;

    /// Forget the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;
}

/// In-process token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<SessionToken>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<SessionToken>> {
        let guard = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn save(&self, token: &SessionToken) -> Result<()> {
        let mut guard = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
