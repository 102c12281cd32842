//! Browser `window.localStorage` backend (wasm32 only).

use web_sys::Storage;

use super::r#trait::{KeyValueStorage, StorageError};

/// Key-value storage backed by the page's `localStorage`.
#[derive(Debug, Clone)]
pub struct WebStorage {
    inner: Storage,
}

impl WebStorage {
    /// Attach to `window.localStorage`.
    ///
    /// Fails when there is no window (e.g. a worker) or the browser has
    /// storage disabled.
    pub fn local() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window object".to_string()))?;
        let inner = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("localStorage access denied: {e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))?;
        Ok(Self { inner })
    }
}

impl KeyValueStorage for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("getItem({key}) failed: {e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("setItem({key}) failed: {e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(format!("removeItem({key}) failed: {e:?}")))
    }
}
