//! Domain layer for the application shell.
//!
//! This module contains the core types shared by every other layer, independent
//! of storage, scheduling or rendering concerns.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`user`]: Signed-in user and login credentials
//! - [`screen`]: Closed enumeration of navigable screens
//! - [`modal`]: Closed enumeration of overlay kinds

pub mod error;
pub mod modal;
pub mod screen;
pub mod user;

pub use error::{Result, ShellError};
pub use modal::ModalId;
pub use screen::ScreenId;
pub use user::{Credentials, User};
