//! # Roster Core
//!
//! State and rules of the Roster user-management console.
//!
//! The core never touches the network or the filesystem. The client crate
//! fetches [`User`] records, the app layer feeds them into a
//! [`UserListView`], and every visible value (filtered list, page count,
//! current page slice) is derived here.
//!
//! ## Quick Start
//!
//! ```rust
//! use roster_core::{User, UserId, UserListView};
//!
//! let mut view = UserListView::new();
//! view.replace_users(vec![
//!     User::new(UserId(1), "George", "Bluth", "george.bluth@reqres.in", ""),
//!     User::new(UserId(2), "Janet", "Weaver", "janet.weaver@reqres.in", ""),
//! ]);
//!
//! view.set_query("GEO");
//! assert_eq!(view.filtered().len(), 1);
//! assert_eq!(view.page(), 1);
//! ```

pub mod error;
pub mod guard;
pub mod paginate;
pub mod session;
pub mod user;
pub mod view;

pub use error::{Result, RosterError};
pub use guard::{Access, Route, guard};
pub use paginate::{filter_users, page_count, page_slice};
pub use session::{Credentials, MemoryTokenStore, SessionToken, TokenStore};
pub use user::{User, UserId, UserUpdate};
pub use view::UserListView;

/// Number of users shown per listing page.
pub const PAGE_SIZE: usize = 6;

/// Key under which the session token is kept (cookie name, storage key).
pub const TOKEN_KEY: &str = "token";
