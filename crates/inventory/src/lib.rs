//! Inventory domain module.
//!
//! This crate contains the inventory store and its business rules, implemented
//! purely as deterministic domain logic (no IO, no UI, no storage).

pub mod format;
pub mod input;
pub mod item;
pub mod store;

pub use format::format_number;
pub use input::{AddItemForm, EditItemForm, FieldError};
pub use item::{Item, ItemEdit, NewItem};
pub use store::{InventoryStore, ItemQuery, SaleReceipt};
