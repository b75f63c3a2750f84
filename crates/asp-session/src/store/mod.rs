//! Key/value store adapter the session hydrates from and persists to.
//!
//! Values are plain strings: the token and current exam are stored as-is,
//! the user as serialized JSON. There is no schema versioning.

mod file;
mod keychain;
mod memory;

use std::sync::Arc;

pub use file::FileStore;
pub use keychain::KeyringStore;
pub use memory::MemoryStore;

use crate::error::StoreError;

/// Storage keys owned by the session.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const USER: &str = "user";
    pub const CURRENT_EXAM: &str = "currentExam";
    /// Written by an older onboarding flow; only ever read to be discarded.
    pub const LEGACY_ONBOARDING_USER: &str = "aspirant-user";

    /// Keys removed on logout.
    pub const SESSION_KEYS: [&str; 3] = [TOKEN, USER, CURRENT_EXAM];
}

pub trait KeyValueStore: Send + Sync {
    /// Read a value. Missing keys are `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend rejects the write (quota, I/O).
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a value. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Short name for status output (`file`, `keyring`, `memory`).
    fn backend_name(&self) -> &'static str;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}

/// Keys become file names and keyring accounts, so keep them boring.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_keys_are_valid() {
        for key in keys::SESSION_KEYS {
            assert!(validate_key(key).is_ok());
        }
        assert!(validate_key(keys::LEGACY_ONBOARDING_USER).is_ok());
    }

    #[test]
    fn path_like_keys_are_rejected() {
        assert!(validate_key("../token").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key("").is_err());
    }

    #[test]
    fn boxed_store_delegates() {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.set(keys::TOKEN, "abc").unwrap();
        assert_eq!(store.get(keys::TOKEN).unwrap().as_deref(), Some("abc"));
        assert_eq!(store.backend_name(), "memory");
    }
}
