//! Session storage settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where session keys (`token`, `user`, `currentExam`) are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// One file per key under [`StorageConfig::dir`].
    #[default]
    File,
    /// OS keychain, one entry per key.
    Keyring,
    /// Process memory only; nothing survives exit.
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Storage directory for the file backend. Empty means `~/.aspirant/storage`.
    #[serde(default)]
    pub dir: String,

    /// Keyring service name for the keyring backend. Empty means `aspirant-cli`.
    #[serde(default)]
    pub keyring_service: String,
}

impl StorageConfig {
    /// Resolve the file backend directory.
    pub fn resolved_dir(&self) -> Option<PathBuf> {
        if self.dir.is_empty() {
            dirs::home_dir().map(|home| home.join(".aspirant").join("storage"))
        } else {
            Some(PathBuf::from(&self.dir))
        }
    }

    pub fn resolved_keyring_service(&self) -> &str {
        if self.keyring_service.is_empty() {
            "aspirant-cli"
        } else {
            &self.keyring_service
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_file_backend_under_home() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::File);
        if let Some(dir) = config.resolved_dir() {
            assert!(dir.ends_with(".aspirant/storage"));
        }
        assert_eq!(config.resolved_keyring_service(), "aspirant-cli");
    }

    #[test]
    fn explicit_dir_wins() {
        let config = StorageConfig {
            dir: "/tmp/aspirant-test".into(),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_dir(),
            Some(PathBuf::from("/tmp/aspirant-test"))
        );
    }
}
