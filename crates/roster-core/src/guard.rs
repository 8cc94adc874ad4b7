//! # Guard Module
//!
//! Route gating on token presence.

use crate::SessionToken;

/// Console routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The login form.
    Login,
    /// The user listing.
    Users,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Users => "/users",
        }
    }

    #[must_use]
    pub fn is_protected(self) -> bool {
        matches!(self, Self::Users)
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Render,
    Redirect(Route),
}

/// Decide whether `route` may render for a caller holding `token`.
///
/// Holding any token is enough; protected routes send everyone else to the
/// login form.
#[must_use]
pub fn guard(route: Route, token: Option<&SessionToken>) -> Access {
    if route.is_protected() && token.is_none() {
        Access::Redirect(Route::Login)
    } else {
        Access::Render
    }
}
