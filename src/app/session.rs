//! Session state and the local credential check.
//!
//! [`Session`] is the state block owned by the session manager. It is replaced
//! wholesale on every transition:
//!
//! ```text
//! initial (loading) ──checkAuth──▶ signed_in | signed_out
//! signed_out ──login──▶ pending ──▶ signed_in | failed
//! signed_in ──logout──▶ pending ──▶ signed_out
//! ```
//!
//! [`authenticate`] is the stand-in for a real authentication service: exactly
//! one credential pair is recognized.

use crate::domain::error::{Result, ShellError};
use crate::domain::{Credentials, User};

/// Email of the only recognized account.
pub const DEMO_EMAIL: &str = "admin@delv.global";

/// Password of the only recognized account.
pub const DEMO_PASSWORD: &str = "admin123";

/// Message shown for any rejected login.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Authentication state of the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub user: Option<User>,
}

impl Session {
    /// State at startup, before the stored session has been checked.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            authenticated: false,
            loading: true,
            error: None,
            user: None,
        }
    }

    /// Resolved, unauthenticated state.
    #[must_use]
    pub const fn signed_out() -> Self {
        Self {
            authenticated: false,
            loading: false,
            error: None,
            user: None,
        }
    }

    #[must_use]
    pub const fn signed_in(user: User) -> Self {
        Self {
            authenticated: true,
            loading: false,
            error: None,
            user: Some(user),
        }
    }

    /// Unauthenticated state carrying a user-visible error.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::signed_out()
        }
    }

    /// Copy of this state with an operation in flight.
    ///
    /// Clears any previous error so a retry starts clean.
    #[must_use]
    pub fn pending(&self) -> Self {
        Self {
            loading: true,
            error: None,
            ..self.clone()
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initial()
    }
}

/// Checks credentials and builds the signed-in user.
///
/// # Errors
///
/// Returns [`ShellError::Auth`] with [`INVALID_CREDENTIALS`] for anything but
/// the recognized pair.
///
/// # Examples
///
/// ```
/// use delv_shell::app::session::authenticate;
/// use delv_shell::domain::Credentials;
///
/// let user = authenticate(&Credentials::new("admin@delv.global", "admin123"), 0)?;
/// assert_eq!(user.name, "Alexandra Morgan");
///
/// let err = authenticate(&Credentials::new("x@y.com", "bad"), 0).unwrap_err();
/// assert_eq!(err.to_string(), "Invalid email or password");
/// # Ok::<(), delv_shell::ShellError>(())
/// ```
pub fn authenticate(credentials: &Credentials, now: i64) -> Result<User> {
    let _span = tracing::debug_span!("authenticate", email = %credentials.email).entered();

    if credentials.email != DEMO_EMAIL || credentials.password != DEMO_PASSWORD {
        tracing::debug!("credentials rejected");
        return Err(ShellError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    let permissions = [
        "candidates:read",
        "candidates:write",
        "pipeline:manage",
        "shortlists:share",
        "settings:admin",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    Ok(User {
        id: "usr-001".to_string(),
        name: "Alexandra Morgan".to_string(),
        email: DEMO_EMAIL.to_string(),
        role: "Head of Talent Acquisition".to_string(),
        avatar: "AM".to_string(),
        department: "Talent Acquisition".to_string(),
        last_login: now,
        permissions,
    })
}
