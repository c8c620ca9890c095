//! In-memory session store.
//!
//! Holds the raw stored text, like a browser storage slot, so tests can seed
//! corrupt values and simulate failing deletes.

use crate::domain::error::{Result, ShellError};
use crate::storage::backend::SessionStore;
use crate::storage::models::SessionRecord;

/// Process-local [`SessionStore`].
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    raw: Option<String>,
    fail_clear: bool,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the slot with arbitrary text.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
            fail_clear: false,
        }
    }

    /// Makes every subsequent `clear` fail.
    #[must_use]
    pub const fn failing_clear(mut self) -> Self {
        self.fail_clear = true;
        self
    }

    /// Raw stored text, if any.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<SessionRecord>> {
        self.raw.as_deref().map(SessionRecord::from_json).transpose()
    }

    fn save(&mut self, record: &SessionRecord) -> Result<()> {
        self.raw = Some(record.to_json()?);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.fail_clear {
            return Err(ShellError::Storage("storage is locked".to_string()));
        }
        self.raw = None;
        Ok(())
    }
}
