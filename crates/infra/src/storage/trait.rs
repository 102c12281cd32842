use std::rc::Rc;
use std::sync::Arc;

use thiserror::Error;

/// Key-value storage operation error.
///
/// These are **infrastructure errors** (backend missing, IO, undecodable data)
/// as opposed to domain errors (validation, stock checks).
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend cannot be reached (no `window`, storage disabled, quota...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value exists but cannot be decoded.
    #[error("corrupt value under {key:?}: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Synchronous string key-value storage (the shape of browser `localStorage`).
///
/// Calls block until the backend has answered; there is exactly one writer.
///
/// ## Implementation Requirements
///
/// - `get` returns `Ok(None)` for keys that were never set or were removed
/// - `set` overwrites any previous value (last write wins)
/// - a successful `set` is visible to the next `get`, including after reopening
///   a durable backend
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S> KeyValueStorage for Arc<S>
where
    S: KeyValueStorage + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S> KeyValueStorage for Rc<S>
where
    S: KeyValueStorage + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
