//! Persisted session record.
//!
//! This is the on-disk layout of the single session key. It is kept separate
//! from the domain [`User`] so that a structurally valid JSON document with bad
//! contents (empty id, unparsable timestamp) is still rejected as corrupt.
//!
//! ```json
//! {
//!   "id": "usr-001",
//!   "name": "Alexandra Morgan",
//!   "email": "admin@delv.global",
//!   "role": "Head of Talent Acquisition",
//!   "avatar": "AM",
//!   "department": "Talent Acquisition",
//!   "lastLogin": "2026-10-19T08:30:00.000Z",
//!   "permissions": ["candidates:read", "candidates:write"]
//! }
//! ```

use crate::domain::error::{Result, ShellError};
use crate::domain::User;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Name of the storage key holding the session record.
pub const SESSION_KEY: &str = "delv_user";

/// The persisted form of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar: String,
    pub department: String,

    /// RFC 3339 timestamp of the most recent login.
    pub last_login: String,

    pub permissions: Vec<String>,
}

impl SessionRecord {
    /// Parses a raw stored value.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::StorageCorruption`] if the text is not a JSON
    /// object with every required field.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| ShellError::StorageCorruption(format!("failed to parse record: {e}")))
    }

    /// Serializes the record for storage.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Storage`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ShellError::Storage(format!("failed to serialize record: {e}")))
    }

    /// Validates the record and converts it to a domain user.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::StorageCorruption`] if an identifying field is
    /// blank or `lastLogin` is not an RFC 3339 timestamp.
    pub fn into_user(self) -> Result<User> {
        if self.id.trim().is_empty() || self.name.trim().is_empty() {
            return Err(ShellError::StorageCorruption("missing id or name".to_string()));
        }
        if !self.email.contains('@') {
            return Err(ShellError::StorageCorruption(format!(
                "invalid email: {}",
                self.email
            )));
        }

        let last_login = DateTime::parse_from_rfc3339(&self.last_login)
            .map_err(|e| ShellError::StorageCorruption(format!("invalid lastLogin: {e}")))?
            .timestamp();

        Ok(User {
            id: self.id,
            name: self.name,
            email: self.email,
            role: self.role,
            avatar: self.avatar,
            department: self.department,
            last_login,
            permissions: self.permissions.into_iter().collect(),
        })
    }
}

impl From<&User> for SessionRecord {
    fn from(user: &User) -> Self {
        let last_login = DateTime::<Utc>::from_timestamp(user.last_login, 0)
            .unwrap_or_default()
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            avatar: user.avatar.clone(),
            department: user.department.clone(),
            last_login,
            permissions: user.permissions.iter().cloned().collect(),
        }
    }
}
