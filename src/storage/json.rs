//! JSON file-based session store.
//!
//! The record lives in `<data_dir>/delv_user.json`. Writes go to a temporary
//! file first and are renamed into place so a crash never leaves a truncated
//! record behind.

use crate::domain::error::{Result, ShellError};
use crate::storage::backend::SessionStore;
use crate::storage::models::{SessionRecord, SESSION_KEY};
use std::path::{Path, PathBuf};

/// File-backed [`SessionStore`].
///
/// # Examples
///
/// ```no_run
/// use delv_shell::storage::{JsonSessionStore, SessionStore};
/// use std::path::Path;
///
/// let store = JsonSessionStore::in_dir(Path::new("/tmp/delv-shell"))?;
/// let record = store.load()?;
/// # Ok::<(), delv_shell::ShellError>(())
/// ```
#[derive(Debug)]
pub struct JsonSessionStore {
    file_path: PathBuf,
}

impl JsonSessionStore {
    /// Opens the store at an explicit file path, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON session store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self { file_path })
    }

    /// Opens the store under a data directory using the standard key name.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn in_dir(data_dir: &Path) -> Result<Self> {
        Self::new(data_dir.join(format!("{SESSION_KEY}.json")))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl SessionStore for JsonSessionStore {
    fn load(&self) -> Result<Option<SessionRecord>> {
        let _span = tracing::debug_span!("json_session_load", path = ?self.file_path).entered();

        if !self.file_path.exists() {
            tracing::debug!("no stored session");
            return Ok(None);
        }

        let bytes = std::fs::read(&self.file_path)?;
        let contents = String::from_utf8(bytes)
            .map_err(|e| ShellError::StorageCorruption(format!("record is not UTF-8: {e}")))?;
        let record = SessionRecord::from_json(&contents)?;

        tracing::debug!(user_id = %record.id, "stored session loaded");
        Ok(Some(record))
    }

    fn save(&mut self, record: &SessionRecord) -> Result<()> {
        let _span = tracing::debug_span!("json_session_save", user_id = %record.id).entered();

        let json = record.to_json()?;
        let tmp_path = self.file_path.with_extension("tmp");

        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path).map_err(|e| {
            ShellError::Storage(format!("failed to move session into place: {e}"))
        })?;

        tracing::debug!("session saved");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("json_session_clear").entered();

        match std::fs::remove_file(&self.file_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SessionRecord {
        SessionRecord {
            id: "usr-001".into(),
            name: "Alexandra Morgan".into(),
            email: "admin@delv.global".into(),
            role: "Head of Talent Acquisition".into(),
            avatar: "AM".into(),
            department: "Talent Acquisition".into(),
            last_login: "2026-10-19T08:30:00.000Z".into(),
            permissions: vec!["candidates:read".into()],
        }
    }

    #[test]
    fn save_then_load_returns_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonSessionStore::in_dir(dir.path()).unwrap();

        store.save(&record()).unwrap();

        assert_eq!(store.load().unwrap(), Some(record()));
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSessionStore::in_dir(dir.path()).unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn truncated_file_is_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSessionStore::in_dir(dir.path()).unwrap();
        std::fs::write(store.path(), "{\"id\": \"usr-0").unwrap();

        assert!(store.load().unwrap_err().is_corruption());
    }

    #[test]
    fn non_utf8_file_is_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSessionStore::in_dir(dir.path()).unwrap();
        std::fs::write(store.path(), [0xff, 0xfe, 0x7b, 0x00]).unwrap();

        assert!(store.load().unwrap_err().is_corruption());
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonSessionStore::in_dir(dir.path()).unwrap();
        store.save(&record()).unwrap();

        store.clear().unwrap();
        store.clear().unwrap();

        assert_eq!(store.load().unwrap(), None);
    }
}
