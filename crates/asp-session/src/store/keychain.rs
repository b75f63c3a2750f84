use super::{KeyValueStore, validate_key};
use crate::error::StoreError;

const DEFAULT_SERVICE: &str = "aspirant-cli";

/// OS keychain store: one credential entry per key under a shared service name.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE)
    }
}

impl KeyringStore {
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<::keyring::Entry, StoreError> {
        validate_key(key)?;
        ::keyring::Entry::new(&self.service, key).map_err(|e| StoreError::Keyring(e.to_string()))
    }
}

impl KeyValueStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.entry(key)?.get_password() {
            Ok(value) if value.trim().is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(::keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StoreError::Keyring(format!("read '{key}': {e}"))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entry(key)?
            .set_password(value)
            .map_err(|e| StoreError::Keyring(format!("write '{key}': {e}")))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(::keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StoreError::Keyring(format!("delete '{key}': {e}"))),
        }
    }

    fn backend_name(&self) -> &'static str {
        "keyring"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_key_is_rejected_before_keyring_access() {
        let store = KeyringStore::new("aspirant-cli-test");
        let err = store.get("bad key").expect_err("should reject");
        assert!(matches!(err, StoreError::InvalidKey(_)));
    }

    #[test]
    fn default_service_name() {
        assert_eq!(KeyringStore::default().service, "aspirant-cli");
    }
}
