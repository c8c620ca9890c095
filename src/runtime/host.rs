//! Host environment seam.
//!
//! The shell does not own a window. Title updates, scroll resets and toasts are
//! forwarded to a [`Host`], which the binary implements on top of the terminal
//! and tests implement with [`RecordingHost`].

use crate::app::Notification;

pub trait Host {
    fn set_title(&mut self, title: &str);
    fn scroll_to_top(&mut self);
    fn notify(&mut self, notification: &Notification);
}

/// Host that records every call for later assertions.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingHost {
    pub titles: Vec<String>,
    pub scroll_resets: usize,
    pub notifications: Vec<Notification>,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last_title(&self) -> Option<&str> {
        self.titles.last().map(String::as_str)
    }

    /// Messages of every notification, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.notifications.iter().map(|n| n.message.as_str()).collect()
    }
}

impl Host for RecordingHost {
    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }

    fn scroll_to_top(&mut self) {
        self.scroll_resets += 1;
    }

    fn notify(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }
}
