//! Error type shared by the core modules.

use crate::UserId;
use thiserror::Error;

/// Errors raised by core operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// Login attempted without an email.
    #[error("email must not be empty")]
    MissingEmail,

    /// Login attempted without a password.
    #[error("password must not be empty")]
    MissingPassword,

    /// A session token was empty or whitespace.
    #[error("session token must not be empty")]
    EmptyToken,

    /// The targeted user is not in the local list.
    #[error("user {0} not found")]
    UserNotFound(UserId),

    /// A token store could not read or write its backing medium.
    #[error("token storage failed: {0}")]
    Storage(String),
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, RosterError>;
