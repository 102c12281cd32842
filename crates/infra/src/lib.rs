//! Infrastructure layer: persistent key-value storage and inventory snapshots.

pub mod snapshot;
pub mod storage;

pub use snapshot::{DEFAULT_INVENTORY_KEY, DEFAULT_PROFIT_KEY, SnapshotStore, StorageKeys};
pub use storage::{InMemoryStorage, KeyValueStorage, StorageError};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use storage::WebStorage;
