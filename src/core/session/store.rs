//! Persisted session store
//!
//! Keeps the access token, refresh token and serialized user under fixed keys in a
//! string key-value backend (`window.localStorage` in the browser). A store that cannot
//! be read behaves like an empty one. Only `write` reports failure, after clearing.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::model::{Session, User};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_KEY: &str = "user";

/// Storage backend error types
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage is not available")]
    Unavailable,

    #[error("Storage operation failed: {0}")]
    Operation(String),

    #[error("Failed to serialize session data: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable string key-value storage
pub trait StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory backend. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// `window.localStorage` backend
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|e| StorageError::Operation(format!("{:?}", e)))?
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(feature = "hydrate")]
impl StorageBackend for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Operation(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Operation(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Operation(format!("{:?}", e)))
    }
}

/// Whatever the store currently holds.
///
/// `refresh_token` and `user` are only ever reported alongside an access token.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersistedSession {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<User>,
}

impl PersistedSession {
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none()
    }
}

/// Session persistence on top of a [`StorageBackend`]
#[derive(Clone)]
pub struct SessionStore {
    backend: Rc<dyn StorageBackend>,
}

impl SessionStore {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Rc::new(backend),
        }
    }

    /// Store backed by browser localStorage when running in the browser,
    /// by memory everywhere else.
    pub fn for_current_target() -> Self {
        #[cfg(feature = "hydrate")]
        {
            Self::new(BrowserStorage)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::new(MemoryStorage::new())
        }
    }

    /// Last written session fields, or an empty value if none or unreadable
    pub fn read(&self) -> PersistedSession {
        self.try_read().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "session storage unreadable, treating as signed out");
            PersistedSession::default()
        })
    }

    fn try_read(&self) -> Result<PersistedSession, StorageError> {
        let Some(access_token) = self.backend.get(ACCESS_TOKEN_KEY)? else {
            return Ok(PersistedSession::default());
        };

        let refresh_token = self.backend.get(REFRESH_TOKEN_KEY)?;
        let user = self
            .backend
            .get(USER_KEY)?
            .and_then(|raw| serde_json::from_str::<User>(&raw).ok());

        Ok(PersistedSession {
            access_token: Some(access_token),
            refresh_token,
            user,
        })
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().access_token
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token
    }

    pub fn user(&self) -> Option<User> {
        self.read().user
    }

    /// Overwrite all three fields.
    ///
    /// On failure nothing of either session is left behind.
    pub fn write(&self, session: &Session) -> Result<(), StorageError> {
        let result = self.try_write(session);
        if let Err(err) = &result {
            tracing::warn!(error = %err, "failed to persist session");
            self.clear();
        }
        result
    }

    fn try_write(&self, session: &Session) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(&session.user)?;
        // The access token marks presence: drop the old one before touching the rest
        self.backend.remove(ACCESS_TOKEN_KEY)?;
        self.backend.set(USER_KEY, &user_json)?;
        self.backend.set(REFRESH_TOKEN_KEY, &session.refresh_token)?;
        self.backend.set(ACCESS_TOKEN_KEY, &session.access_token)
    }

    /// Store a freshly minted access token, keeping the other fields
    pub fn replace_access_token(&self, token: &str) {
        if let Err(err) = self.backend.set(ACCESS_TOKEN_KEY, token) {
            tracing::warn!(error = %err, "failed to persist refreshed access token");
        }
    }

    /// Update the cached user, keeping the tokens
    pub fn replace_user(&self, user: &User) {
        let result = serde_json::to_string(user)
            .map_err(StorageError::from)
            .and_then(|json| self.backend.set(USER_KEY, &json));
        if let Err(err) = result {
            tracing::warn!(error = %err, "failed to persist user");
        }
    }

    /// Remove every session field
    pub fn clear(&self) {
        // Access token first: once it is gone no reader sees the leftovers
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            if let Err(err) = self.backend.remove(key) {
                tracing::warn!(error = %err, key, "failed to clear session field");
            }
        }
    }
}
