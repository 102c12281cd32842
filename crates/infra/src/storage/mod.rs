//! Synchronous key-value storage boundary.
//!
//! The inventory is persisted as whole-value snapshots under fixed keys, so
//! backends only need string get/set/remove.

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
pub mod in_memory;
pub mod r#trait;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
pub use in_memory::InMemoryStorage;
pub use r#trait::{KeyValueStorage, StorageError};
#[cfg(target_arch = "wasm32")]
pub use web::WebStorage;
