use std::fs;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, validate_key};
use crate::error::StoreError;

/// One file per key under a private directory (`0700`, files `0600` on Unix).
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }

    fn ensure_root(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&self.root, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", self.root.display());
            }
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => Ok(Some(content)),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        self.ensure_root()?;
        fs::write(&path, value).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))
                .map_err(|source| StoreError::Io { path, source })?;
        }

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = FileStore::new(tmp.path().join("storage"));

        assert!(store.get("token").unwrap().is_none());
        store.set("token", "abc.def.ghi").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("abc.def.ghi"));

        store.remove("token").unwrap();
        assert!(store.get("token").unwrap().is_none());
        assert!(!tmp.path().join("storage").join("token").exists());
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = FileStore::new(tmp.path());
        store.remove("user").expect("idempotent remove");
    }

    #[test]
    fn whitespace_only_value_reads_as_missing() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        std::fs::write(tmp.path().join("token"), "   \n  ").expect("write");
        let store = FileStore::new(tmp.path());
        assert!(store.get("token").unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn written_files_are_private() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let root = tmp.path().join("storage");
        let store = FileStore::new(&root);
        store.set("token", "secret").unwrap();

        let file_mode = std::fs::metadata(root.join("token"))
            .expect("metadata")
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(file_mode, 0o600);

        let dir_mode = std::fs::metadata(&root)
            .expect("metadata")
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(dir_mode, 0o700);
    }

    #[test]
    fn invalid_key_never_touches_disk() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = FileStore::new(tmp.path());
        let err = store.set("../escape", "x").expect_err("should reject");
        assert!(matches!(err, StoreError::InvalidKey(_)));
    }
}
