//! JSON-file backed storage.

use super::{apply_ops, DurableStorage, StorageOp};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Default file name inside the data directory
const SESSION_FILE: &str = "session.json";

/// Storage persisted as a single JSON object on disk.
///
/// Every batch rewrites the whole file through a temporary file and a rename,
/// so readers never see half of a batch. The file is created with 0600
/// permissions since it holds the session token.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Storage at `<dir>/session.json`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&content)
            .map_err(|e| Error::Storage(format!("Corrupt storage file {:?}: {}", self.path, e)))
    }

    fn write_entries(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        restrict_permissions(&tmp)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

impl DurableStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().map_err(|_| Error::LockPoisoned)?;
        Ok(self.read_entries()?.remove(key))
    }

    fn apply(&self, ops: &[StorageOp]) -> Result<()> {
        let _guard = self.lock.lock().map_err(|_| Error::LockPoisoned)?;
        let mut entries = self.read_entries()?;
        apply_ops(&mut entries, ops)?;
        debug!("Writing {} storage op(s) to {:?}", ops.len(), self.path);
        self.write_entries(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::in_dir(dir.path());
        storage
            .apply(&[StorageOp::set("auth_token", "abc"), StorageOp::set("current_user", "{}")])
            .unwrap();

        let reopened = FileStorage::in_dir(dir.path());
        assert_eq!(reopened.get("auth_token").unwrap().as_deref(), Some("abc"));
        assert_eq!(reopened.get("current_user").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("s.json"));
        assert_eq!(storage.get("auth_token").unwrap(), None);

        storage.set("k", "v").unwrap();
        assert!(storage.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();
        let storage = FileStorage::new(&path);
        assert!(matches!(storage.get("k"), Err(Error::Storage(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let storage = FileStorage::in_dir(dir.path());
        storage.set("auth_token", "secret").unwrap();
        let mode = fs::metadata(storage.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }
}
