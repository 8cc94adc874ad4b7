//! # CLI Console
//!
//! Terminal rendition of the console. The token lives in a
//! [`TokenStore`](roster_core::TokenStore) (a file for the binary), and every
//! command other than `login`/`logout` is guarded by it.
//!
//! Each command starts from a fresh fetch of the directory, so edits and
//! deletes only live for the duration of that command.

use crate::AppError;
use crate::auth::{LoginMode, obtain_token};
use roster_client::DirectoryClient;
use roster_core::{
    Access, Credentials, Route, RosterError, SessionToken, TokenStore, User, UserId,
    UserListView, UserUpdate, guard,
};
use serde::Serialize;
use tracing::info;

// =============================================================================
// SESSION COMMANDS
// =============================================================================

/// The stored token, or [`AppError::NotLoggedIn`].
pub fn require_session(store: &impl TokenStore) -> Result<SessionToken, AppError> {
    let token = store.load()?;
    match (guard(Route::Users, token.as_ref()), token) {
        (Access::Render, Some(token)) => Ok(token),
        _ => Err(AppError::NotLoggedIn),
    }
}

pub async fn cmd_login(
    client: &DirectoryClient,
    mode: LoginMode,
    store: &impl TokenStore,
    credentials: &Credentials,
) -> Result<SessionToken, AppError> {
    let token = obtain_token(client, mode, credentials).await?;
    store.save(&token)?;
    info!(email = %credentials.email, "logged in");
    println!("Logged in as {}", credentials.email.trim());
    Ok(token)
}

pub fn cmd_logout(store: &impl TokenStore) -> Result<(), AppError> {
    store.clear()?;
    println!("Logged out");
    Ok(())
}

pub fn cmd_whoami(store: &impl TokenStore) -> Result<SessionToken, AppError> {
    let token = require_session(store)?;
    println!("Logged in (token {})", token);
    Ok(token)
}

// =============================================================================
// LISTING
// =============================================================================

#[derive(Serialize)]
struct ListingJson<'a> {
    query: &'a str,
    page: usize,
    total_pages: usize,
    users: &'a [User],
}

/// Fetch the directory and show one page of it.
///
/// `query` filters first and last names case-insensitively; `page` is
/// clamped into the pages the filter leaves.
pub async fn cmd_users(
    client: &DirectoryClient,
    store: &impl TokenStore,
    query: Option<&str>,
    page: usize,
    json: bool,
) -> Result<UserListView, AppError> {
    require_session(store)?;

    let mut view = UserListView::new();
    view.replace_users(client.fetch_all_users().await?);
    if let Some(query) = query {
        view.set_query(query);
    }
    view.go_to_page(page);

    if json {
        let listing = ListingJson {
            query: view.query(),
            page: view.page(),
            total_pages: view.total_pages(),
            users: view.displayed(),
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        for user in view.displayed() {
            println!(
                "{:>4}  {:<24} {}",
                user.id.0,
                user.full_name(),
                user.email
            );
        }
        println!("Page {} of {}", view.page(), view.total_pages());
    }
    Ok(view)
}

// =============================================================================
// MUTATIONS
// =============================================================================

/// Fields to change in `edit`; unset fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct EditFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl EditFields {
    fn apply_to(self, user: &User) -> UserUpdate {
        let current = UserUpdate::from(user);
        UserUpdate {
            first_name: self.first_name.unwrap_or(current.first_name),
            last_name: self.last_name.unwrap_or(current.last_name),
            email: self.email.unwrap_or(current.email),
        }
    }
}

/// Edit user `id` and return the record as it now stands locally.
pub async fn cmd_edit(
    client: &DirectoryClient,
    store: &impl TokenStore,
    id: UserId,
    fields: EditFields,
) -> Result<User, AppError> {
    require_session(store)?;

    let mut view = UserListView::new();
    view.replace_users(client.fetch_all_users().await?);
    let update = fields.apply_to(view.begin_edit(id)?);
    view.update_draft(&update);

    client.update_user(id, &update).await?;
    let user = view
        .commit_edit()?
        .ok_or(RosterError::UserNotFound(id))?;
    println!("Updated {:>4}  {:<24} {}", user.id.0, user.full_name(), user.email);
    Ok(user)
}

/// Delete user `id` and return the record that was removed.
///
/// Ids missing from the directory listing are refused before any delete is
/// sent.
pub async fn cmd_delete(
    client: &DirectoryClient,
    store: &impl TokenStore,
    id: UserId,
) -> Result<User, AppError> {
    require_session(store)?;

    let mut view = UserListView::new();
    view.replace_users(client.fetch_all_users().await?);
    if view.find(id).is_none() {
        return Err(RosterError::UserNotFound(id).into());
    }

    client.delete_user(id).await?;
    let user = view.remove(id).ok_or(RosterError::UserNotFound(id))?;
    println!("User deleted successfully!");
    Ok(user)
}
