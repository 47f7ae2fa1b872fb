//! Credential persistence
//!
//! The session owns its storage through the [`CredentialStore`] trait:
//! explicit `load` / `save` / `clear`, two logical entries (`auth_token`,
//! `token_type`), no ambient global state. [`KeyringStore`] persists to the
//! OS keychain; [`MemoryStore`] backs tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use keyring::Entry;
use thiserror::Error;

use super::credential::{Credential, AUTH_TOKEN_KEY, TOKEN_TYPE_KEY};

/// Errors that can occur during credential storage operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Keyring operation failed
    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Owned credential persistence with an explicit lifecycle
///
/// Invariants every implementation upholds:
/// - `load` returns `None` whenever no token is stored, regardless of a
///   stored token-type
/// - the token-type entry is never persisted empty
/// - `clear` is idempotent and tolerates absent entries
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore: Send + Sync {
    /// Reads the stored credential, if any
    fn load(&self) -> Result<Option<Credential>, StoreError>;

    /// Persists both credential entries, overwriting previous values
    fn save(&self, credential: &Credential) -> Result<(), StoreError>;

    /// Removes both credential entries
    fn clear(&self) -> Result<(), StoreError>;
}

/// Credential store backed by the OS keychain
///
/// Uses one keyring entry per logical key under a common service name.
///
/// # Example
///
/// ```no_run
/// use microblog_client::auth::{Credential, CredentialStore, KeyringStore};
///
/// let store = KeyringStore::new();
/// store.save(&Credential::bearer("jwt-token")).unwrap();
/// assert!(store.load().unwrap().is_some());
/// store.clear().unwrap();
/// ```
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    /// Creates a store with the default service name
    pub fn new() -> Self {
        Self::with_service("microblog")
    }

    /// Creates a store with a custom service name
    ///
    /// Useful for testing or separating credential sets per deployment.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Returns the service name used for this store
    pub fn service(&self) -> &str {
        &self.service
    }

    fn entry(&self, key: &str) -> Result<Entry, StoreError> {
        Ok(Entry::new(&self.service, key)?)
    }

    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StoreError::Keyring(e)),
        }
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StoreError::Keyring(e)),
        }
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for KeyringStore {
    fn load(&self) -> Result<Option<Credential>, StoreError> {
        let Some(token) = self.read(AUTH_TOKEN_KEY)? else {
            return Ok(None);
        };
        let token_type = self.read(TOKEN_TYPE_KEY)?.unwrap_or_default();
        Ok(Some(Credential::new(token, token_type)))
    }

    fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        self.entry(AUTH_TOKEN_KEY)?.set_password(credential.token())?;
        self.entry(TOKEN_TYPE_KEY)?
            .set_password(credential.token_type())?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.delete(AUTH_TOKEN_KEY)?;
        self.delete(TOKEN_TYPE_KEY)?;
        Ok(())
    }
}

/// In-memory credential store
///
/// Keeps the same two logical entries as [`KeyringStore`] but never touches
/// the OS keychain. Intended for tests and short-lived sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<&'static str, String>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Result<Option<Credential>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let Some(token) = entries.get(AUTH_TOKEN_KEY) else {
            return Ok(None);
        };
        let token_type = entries.get(TOKEN_TYPE_KEY).cloned().unwrap_or_default();
        Ok(Some(Credential::new(token.clone(), token_type)))
    }

    fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(AUTH_TOKEN_KEY, credential.token().to_string());
        entries.insert(TOKEN_TYPE_KEY, credential.token_type().to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(AUTH_TOKEN_KEY);
        entries.remove(TOKEN_TYPE_KEY);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&Credential::bearer("tok-1")).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.token(), "tok-1");
        assert_eq!(loaded.token_type(), "Bearer");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_memory_store_overwrite() {
        let store = MemoryStore::new();
        store.save(&Credential::bearer("first")).unwrap();
        store.save(&Credential::new("second", "Token")).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.token(), "second");
        assert_eq!(loaded.token_type(), "Token");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = MemoryStore::new();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_token_type_never_empty() {
        let store = MemoryStore::new();
        store.save(&Credential::new("tok", "")).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.token_type(), "Bearer");
    }

    #[test]
    fn test_keyring_store_service_names() {
        let store = KeyringStore::new();
        assert_eq!(store.service(), "microblog");

        let custom = KeyringStore::with_service("microblog-test");
        assert_eq!(custom.service(), "microblog-test");
    }
}
