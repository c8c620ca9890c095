//! Session storage abstraction.
//!
//! This module defines the [`SessionStore`] trait, the stand-in for browser
//! local storage. It holds at most one session record under a single key.

use crate::domain::error::Result;
use crate::storage::models::SessionRecord;

/// Persistence for the single session record.
///
/// # Implementations
///
/// - [`JsonSessionStore`](crate::storage::JsonSessionStore): one JSON file on disk
/// - [`MemorySessionStore`](crate::storage::MemorySessionStore): in-process, for tests and demos
pub trait SessionStore: Send {
    /// Reads the stored record.
    ///
    /// Returns `Ok(None)` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::StorageCorruption`](crate::domain::ShellError::StorageCorruption)
    /// if a value is stored but cannot be parsed, or another error if the read fails.
    fn load(&self) -> Result<Option<SessionRecord>>;

    /// Replaces the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save(&mut self, record: &SessionRecord) -> Result<()>;

    /// Removes the stored record. Removing an absent record succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn clear(&mut self) -> Result<()>;
}
