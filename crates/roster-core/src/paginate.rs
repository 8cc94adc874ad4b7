//! # Paginate Module
//!
//! Local search filter and fixed-size page slicing.
//!
//! Nothing here is indexed or memoized: callers re-run the filter over the
//! full list whenever the list or the query changes.

use crate::User;

/// Users whose first or last name contains `query`, case-insensitively.
///
/// Order of the input is preserved.
#[must_use]
pub fn filter_users(users: &[User], query: &str) -> Vec<User> {
    users
        .iter()
        .filter(|user| user.matches(query))
        .cloned()
        .collect()
}

/// Number of pages needed for `len` items, `0` when there are none.
#[must_use]
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// The 1-based `page` of `items`.
///
/// Page 0 and pages past the end are empty. The slice never holds more than
/// `page_size` items.
#[must_use]
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

// =============================================================================
// TESTS
// =============================================================================
