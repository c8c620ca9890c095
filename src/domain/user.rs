//! Authenticated user model and login credentials.
//!
//! [`User`] is the domain representation of a signed-in recruiter. The
//! persisted layout lives in [`crate::storage::SessionRecord`]; conversion
//! between the two validates the record so a damaged file never produces a
//! half-populated user.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// A signed-in user.
///
/// # Fields
///
/// - `id`: Stable account identifier
/// - `avatar`: Initials shown in the header badge
/// - `last_login`: Unix timestamp of the most recent successful login
/// - `permissions`: Capability names granted to the account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar: String,
    pub department: String,
    pub last_login: i64,
    pub permissions: BTreeSet<String>,
}

impl User {
    /// Returns `true` if the user holds the named permission.
    #[must_use]
    pub fn can(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// First name, used for greetings.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    /// Returns a human-readable string describing when the user last logged in.
    ///
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - Otherwise: "Xd ago"
    #[must_use]
    pub fn last_login_ago(&self, now: i64) -> String {
        let diff = (now - self.last_login).max(0);

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        }
    }
}

/// Email and password submitted from the login view.
///
/// `Debug` redacts the password so credentials never reach trace files.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
