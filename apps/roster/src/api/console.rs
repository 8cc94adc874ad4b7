//! Per-session console state.

use roster_core::UserListView;
use std::time::{Duration, Instant};

/// How long a success notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// A transient success message.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    shown_at: Instant,
}

impl Notice {
    pub fn new(message: impl Into<String>, now: Instant) -> Self {
        Self {
            message: message.into(),
            shown_at: now,
        }
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < NOTICE_TTL
    }
}

/// Everything one logged-in browser sees on the listing page.
#[derive(Debug, Default)]
pub struct Console {
    /// Email given at login; unknown for tokens this server never issued.
    pub email: Option<String>,
    pub view: UserListView,
    /// Set once the full user list has been fetched for this session.
    pub loaded: bool,
    pub notice: Option<Notice>,
}

impl Console {
    pub fn new(email: Option<String>) -> Self {
        Self {
            email,
            ..Self::default()
        }
    }

    /// Drop the notice once its time is up.
    pub fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| !n.is_visible(now)) {
            self.notice = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_lasts_three_seconds() {
        let start = Instant::now();
        let notice = Notice::new("User deleted successfully!", start);
        assert!(notice.is_visible(start));
        assert!(notice.is_visible(start + Duration::from_millis(2999)));
        assert!(!notice.is_visible(start + NOTICE_TTL));
    }

    #[test]
    fn expired_notice_is_dropped() {
        let start = Instant::now();
        let mut console = Console::new(None);
        console.notice = Some(Notice::new("done", start));

        console.expire_notice(start + Duration::from_secs(1));
        assert!(console.notice.is_some());

        console.expire_notice(start + Duration::from_secs(4));
        assert!(console.notice.is_none());
    }
}
