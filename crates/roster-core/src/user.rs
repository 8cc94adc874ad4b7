//! # User Module
//!
//! User records as served by the remote directory API.
//!
//! The record shape is taken verbatim from the remote listing: no local
//! schema is enforced beyond the fields being present.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// USER ID
// =============================================================================

/// Remote identifier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// USER
// =============================================================================

/// A user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Avatar image URL.
    pub avatar: String,
}

impl User {
    /// Create a new user record.
    pub fn new(
        id: UserId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            avatar: avatar.into(),
        }
    }

    /// "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive substring match against first or last name.
    ///
    /// The email is not searched. An empty query matches everyone.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.first_name.to_lowercase().contains(&needle)
            || self.last_name.to_lowercase().contains(&needle)
    }

    /// Copy of this user with the editable fields taken from `update`.
    #[must_use]
    pub fn apply(&self, update: &UserUpdate) -> Self {
        Self {
            id: self.id,
            first_name: update.first_name.clone(),
            last_name: update.last_name.clone(),
            email: update.email.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

// =============================================================================
// USER UPDATE
// =============================================================================

/// Body of an update request: the fields a user can edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&User> for UserUpdate {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
