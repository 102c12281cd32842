//! Whole-inventory snapshots under two fixed storage keys.
//!
//! Layout (unversioned):
//! - inventory key: JSON array of item records
//! - profit key: the global profit as decimal text

use core::str::FromStr;

use rust_decimal::Decimal;

use stockbook_inventory::{InventoryStore, Item};

use crate::storage::{KeyValueStorage, StorageError};

pub const DEFAULT_INVENTORY_KEY: &str = "inventoryData";
pub const DEFAULT_PROFIT_KEY: &str = "totalProfit";

/// Storage keys the snapshot is written under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub inventory: String,
    pub profit: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            inventory: DEFAULT_INVENTORY_KEY.to_string(),
            profit: DEFAULT_PROFIT_KEY.to_string(),
        }
    }
}

/// Loads and saves the full inventory state through a [`KeyValueStorage`].
#[derive(Debug)]
pub struct SnapshotStore<S> {
    storage: S,
    keys: StorageKeys,
}

impl<S> SnapshotStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_keys(storage, StorageKeys::default())
    }

    pub fn with_keys(storage: S, keys: StorageKeys) -> Self {
        Self { storage, keys }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<S: KeyValueStorage> SnapshotStore<S> {
    /// Read the last saved state.
    ///
    /// A missing inventory means an empty one; a missing or unreadable profit
    /// counts as zero. An inventory value that does not decode is an error, so
    /// the caller never overwrites data it could not read.
    pub fn load(&self) -> Result<InventoryStore, StorageError> {
        let items = match self.storage.get(&self.keys.inventory)? {
            None => Vec::new(),
            Some(raw) => serde_json::from_str::<Option<Vec<Item>>>(&raw)
                .map_err(|e| StorageError::Corrupt {
                    key: self.keys.inventory.clone(),
                    reason: e.to_string(),
                })?
                .unwrap_or_default(),
        };

        let total_profit = match self.storage.get(&self.keys.profit)? {
            None => Decimal::ZERO,
            Some(raw) => parse_profit(&raw).unwrap_or_else(|| {
                tracing::warn!(key = %self.keys.profit, value = %raw, "unreadable profit, starting from zero");
                Decimal::ZERO
            }),
        };

        tracing::debug!(items = items.len(), %total_profit, "inventory snapshot loaded");
        Ok(InventoryStore::from_parts(items, total_profit))
    }

    /// Write the complete state: inventory first, then profit.
    pub fn save(&self, store: &InventoryStore) -> Result<(), StorageError> {
        let items = serde_json::to_string(store.items())
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let previous = self.storage.get(&self.keys.inventory)?;
        self.storage.set(&self.keys.inventory, &items)?;
        if let Err(e) = self
            .storage
            .set(&self.keys.profit, &store.total_profit().to_string())
        {
            // Put the old inventory back so both keys stay in step.
            let restored = match &previous {
                Some(old) => self.storage.set(&self.keys.inventory, old),
                None => self.storage.remove(&self.keys.inventory),
            };
            if let Err(restore) = restored {
                tracing::error!(error = %restore, "failed to restore previous inventory");
            }
            return Err(e);
        }

        tracing::debug!(
            items = store.len(),
            total_profit = %store.total_profit(),
            "inventory snapshot saved"
        );
        Ok(())
    }
}

fn parse_profit(raw: &str) -> Option<Decimal> {
    let text = raw.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
