//! Error types for the Delv application shell.
//!
//! This module defines the centralized error type [`ShellError`] and a type alias
//! [`Result`] used throughout the crate. Errors are implemented with `thiserror`.
//!
//! Nothing in the shell is fatal to the running process. Each variant has a fixed
//! recovery path:
//!
//! - [`ShellError::Auth`] surfaces on the login view and as a notification
//! - [`ShellError::Render`] is converted into a fallback panel by the view dispatcher
//! - [`ShellError::StorageCorruption`] is discarded silently and treated as "logged out"

use thiserror::Error;

/// The main error type for shell operations.
///
/// # Examples
///
/// ```
/// use delv_shell::domain::ShellError;
///
/// let err = ShellError::Auth("Invalid email or password".to_string());
/// assert_eq!(err.to_string(), "Invalid email or password");
/// ```
#[derive(Debug, Error)]
pub enum ShellError {
    /// Authentication failed.
    ///
    /// Raised for rejected credentials and for failures while checking or
    /// clearing the persisted session. The message is shown to the user verbatim.
    #[error("{0}")]
    Auth(String),

    /// A screen view failed while being constructed or rendered.
    ///
    /// Only ever produced inside the view dispatcher, which converts it into a
    /// recoverable fallback panel.
    #[error("failed to render {screen}: {message}")]
    Render {
        /// Identifier of the screen that failed.
        screen: String,
        /// Description of the failure (error message or panic payload).
        message: String,
    },

    /// The persisted session record is missing fields or malformed.
    #[error("Corrupt session record: {0}")]
    StorageCorruption(String),

    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ShellError {
    /// Returns `true` for errors that must be recovered as "no session".
    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(self, Self::StorageCorruption(_))
    }
}

/// A specialized `Result` type for shell operations.
pub type Result<T> = std::result::Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_displays_message_verbatim() {
        let err = ShellError::Auth("Invalid email or password".into());
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[test]
    fn render_error_names_the_screen() {
        let err = ShellError::Render {
            screen: "candidate-detail".into(),
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "failed to render candidate-detail: boom");
    }

    #[test]
    fn only_corruption_is_flagged_as_corruption() {
        assert!(ShellError::StorageCorruption("x".into()).is_corruption());
        assert!(!ShellError::Storage("x".into()).is_corruption());
    }
}
