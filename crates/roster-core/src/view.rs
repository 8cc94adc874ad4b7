//! # View Module
//!
//! State of the user listing page.
//!
//! The view owns the full user list plus the search query and current page.
//! The filtered list and page count are derived: any change to the list or
//! the query rebuilds both from scratch and sends the reader back to page 1.
//! Page navigation alone never rebuilds anything.

use crate::paginate::{filter_users, page_count, page_slice};
use crate::{PAGE_SIZE, Result, RosterError, User, UserId, UserUpdate};

/// Listing page state: search, pagination and the edit draft.
#[derive(Debug, Clone)]
pub struct UserListView {
    users: Vec<User>,
    query: String,
    page: usize,
    filtered: Vec<User>,
    total_pages: usize,
    editing: Option<User>,
}

impl Default for UserListView {
    fn default() -> Self {
        Self::new()
    }
}

impl UserListView {
    /// An empty view on page 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            query: String::new(),
            page: 1,
            filtered: Vec::new(),
            total_pages: 0,
            editing: None,
        }
    }

    // =========================================================================
    // DERIVATION
    // =========================================================================

    fn recompute(&mut self) {
        self.filtered = filter_users(&self.users, &self.query);
        self.total_pages = page_count(self.filtered.len(), PAGE_SIZE);
        self.page = 1;
    }

    /// Install the full user list.
    pub fn replace_users(&mut self, users: Vec<User>) {
        self.users = users;
        self.recompute();
    }

    /// Change the search query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.recompute();
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    /// Jump to `page`, clamped into the existing pages.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages.max(1));
    }

    pub fn next_page(&mut self) {
        if self.has_next() {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.has_prev() {
            self.page -= 1;
        }
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// False on the last page, and when there are no pages at all.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.total_pages != 0 && self.page < self.total_pages
    }

    // =========================================================================
    // MUTATION
    // =========================================================================

    /// Remove the user with `id`, returning it.
    ///
    /// The list is untouched when no such user exists.
    pub fn remove(&mut self, id: UserId) -> Option<User> {
        let index = self.users.iter().position(|u| u.id == id)?;
        let removed = self.users.remove(index);
        if self.editing.as_ref().is_some_and(|draft| draft.id == id) {
            self.editing = None;
        }
        self.recompute();
        Some(removed)
    }

    /// Swap in `user` for the record with the same id.
    pub fn replace(&mut self, user: User) -> Result<()> {
        let slot = self
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(RosterError::UserNotFound(user.id))?;
        *slot = user;
        self.recompute();
        Ok(())
    }

    /// Open an edit draft for the user with `id`.
    pub fn begin_edit(&mut self, id: UserId) -> Result<&User> {
        let user = self.find(id).cloned().ok_or(RosterError::UserNotFound(id))?;
        Ok(self.editing.insert(user))
    }

    /// Replace the draft's editable fields.
    pub fn update_draft(&mut self, update: &UserUpdate) {
        if let Some(draft) = self.editing.as_mut() {
            *draft = draft.apply(update);
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Write the draft into the list and close it.
    ///
    /// Returns the committed user, or `None` when no draft was open.
    pub fn commit_edit(&mut self) -> Result<Option<User>> {
        let Some(draft) = self.editing.take() else {
            return Ok(None);
        };
        self.replace(draft.clone())?;
        Ok(Some(draft))
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// The users on the current page.
    #[must_use]
    pub fn displayed(&self) -> &[User] {
        page_slice(&self.filtered, self.page, PAGE_SIZE)
    }

    #[must_use]
    pub fn find(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub fn filtered(&self) -> &[User] {
        &self.filtered
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current page, 1-based.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    #[must_use]
    pub fn editing(&self) -> Option<&User> {
        self.editing.as_ref()
    }
}

// =============================================================================
// TESTS
// =============================================================================
