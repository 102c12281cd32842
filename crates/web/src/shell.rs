//! Application shell: owns the inventory and its storage for the lifetime of
//! the page, and turns raw user input into store operations.
//!
//! Every handler runs to completion synchronously. A mutating handler works
//! on a copy of the inventory, persists the copy, and only then makes it the
//! current state, so memory and storage never disagree after a failed write.

use thiserror::Error;

use stockbook_core::{DomainError, ItemId};
use stockbook_infra::{KeyValueStorage, SnapshotStore, StorageError, StorageKeys};
use stockbook_inventory::input::parse_requested_quantity;
use stockbook_inventory::{AddItemForm, EditItemForm, FieldError, InventoryStore, format_number};

use crate::types::{ItemRow, Notification, Summary};

/// Why a user action was rejected.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("invalid item: {0}")]
    InvalidItem(FieldError),

    #[error("invalid requested quantity: {0}")]
    InvalidQuantity(String),

    #[error("requested {requested} but only {available} in stock")]
    ExceedsStock { requested: i64, available: u32 },

    #[error("invalid update: {0}")]
    InvalidUpdate(FieldError),

    #[error("item not found")]
    NotFound,

    #[error(transparent)]
    Domain(DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<DomainError> for ShellError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::InvalidQuantity(q) => ShellError::InvalidQuantity(q.to_string()),
            DomainError::InsufficientStock {
                requested,
                available,
            } => ShellError::ExceedsStock {
                requested,
                available,
            },
            DomainError::NotFound => ShellError::NotFound,
            other => ShellError::Domain(other),
        }
    }
}

impl ShellError {
    /// Text for the blocking notification shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ShellError::InvalidItem(FieldError::Missing(_)) => {
                "Please fill in every field.".to_string()
            }
            ShellError::InvalidItem(e) => format!("Invalid input: {e}. Item not added."),
            ShellError::InvalidQuantity(_) => "Please enter a valid quantity.".to_string(),
            ShellError::ExceedsStock { .. } => "Quantity exceeds available stock.".to_string(),
            ShellError::InvalidUpdate(_) => "Invalid input. Item not updated.".to_string(),
            ShellError::NotFound => "This item no longer exists.".to_string(),
            ShellError::Domain(e) => format!("Operation failed: {e}"),
            ShellError::Storage(e) => format!("Could not save inventory: {e}"),
        }
    }
}

/// The running application: inventory state plus where it is persisted.
#[derive(Debug)]
pub struct AppShell<S> {
    store: InventoryStore,
    snapshots: SnapshotStore<S>,
}

impl<S: KeyValueStorage> AppShell<S> {
    /// Load the saved inventory from `storage` (default keys).
    pub fn open(storage: S) -> Result<Self, StorageError> {
        Self::open_with_keys(storage, StorageKeys::default())
    }

    pub fn open_with_keys(storage: S, keys: StorageKeys) -> Result<Self, StorageError> {
        let snapshots = SnapshotStore::with_keys(storage, keys);
        let store = snapshots.load()?;
        tracing::info!(
            items = store.len(),
            total_profit = %store.total_profit(),
            "inventory opened"
        );
        Ok(Self { store, snapshots })
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    pub fn snapshots(&self) -> &SnapshotStore<S> {
        &self.snapshots
    }

    /// Shut down, handing back the storage backend.
    pub fn close(self) -> S {
        self.snapshots.into_storage()
    }

    /// Add-form submit.
    pub fn submit_add(&mut self, form: &AddItemForm) -> Result<ItemId, ShellError> {
        let new = form.parse().map_err(|e| {
            tracing::warn!(error = %e, "add rejected");
            ShellError::InvalidItem(e)
        })?;
        let name = new.name.clone();
        let id = self.commit(|store| Ok(store.add(new)))?;
        tracing::info!(item_id = %id, name = %name, "item added");
        Ok(id)
    }

    /// Sell button: `raw_quantity` is the text typed into the prompt.
    pub fn sell(&mut self, id: ItemId, raw_quantity: &str) -> Result<Notification, ShellError> {
        let requested = parse_requested_quantity(raw_quantity).map_err(|e| {
            tracing::warn!(item_id = %id, error = %e, "sale rejected");
            ShellError::InvalidQuantity(raw_quantity.to_string())
        })?;

        let receipt = self
            .commit(|store| store.sell(id, requested).map_err(ShellError::from))
            .inspect_err(|e| tracing::warn!(item_id = %id, error = %e, "sale rejected"))?;

        tracing::info!(
            item_id = %id,
            quantity = receipt.quantity,
            sold_amount = %receipt.sold_amount,
            profit = %receipt.profit,
            removed = receipt.removed,
            "item sold"
        );
        Ok(Notification::Sold {
            quantity: receipt.quantity,
            item_name: receipt.item_name,
            sold_amount: format_number(receipt.sold_amount),
            profit: format_number(receipt.profit),
        })
    }

    /// Current values, used as the defaults of the update prompts.
    pub fn edit_defaults(&self, id: ItemId) -> Option<EditItemForm> {
        self.store.get(id).map(|item| EditItemForm {
            name: item.name().to_string(),
            cost_price: item.cost_price().to_string(),
            selling_price: item.selling_price().to_string(),
            quantity: item.quantity().to_string(),
            added_date_time: item.added_date_time().to_string(),
        })
    }

    /// Update button: all prompt answers are applied together or not at all.
    pub fn update(&mut self, id: ItemId, form: &EditItemForm) -> Result<Notification, ShellError> {
        let edit = form.parse().map_err(|e| {
            tracing::warn!(item_id = %id, error = %e, "update rejected");
            ShellError::InvalidUpdate(e)
        })?;
        self.commit(|store| store.edit(id, edit).map_err(ShellError::from))?;
        tracing::info!(item_id = %id, "item updated");
        Ok(Notification::Updated)
    }

    /// Delete button. Nothing happens unless the user confirmed.
    pub fn delete(&mut self, id: ItemId, confirmed: bool) -> Result<Option<Notification>, ShellError> {
        if !confirmed {
            tracing::debug!(item_id = %id, "delete cancelled");
            return Ok(None);
        }
        let removed = self.commit(|store| store.delete(id).map_err(ShellError::from))?;
        tracing::info!(item_id = %id, name = %removed.name(), "item deleted");
        Ok(Some(Notification::Deleted))
    }

    /// Table rows matching the search text, in inventory order.
    pub fn rows(&self, filter: &str) -> Vec<ItemRow> {
        self.store
            .query(filter)
            .map(|(index, item)| ItemRow {
                id: item.id_typed(),
                index,
                name: item.name().to_string(),
                added_date_time: item.added_date_time().to_string(),
                cost_price: format_number(item.cost_price()),
                selling_price: format_number(item.selling_price()),
                quantity: item.quantity(),
                total_cost: format_number(item.total_cost()),
                profit: format_number(item.profit()),
            })
            .collect()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total_cost: format_number(self.store.total_cost()),
            total_profit: format_number(self.store.total_profit()),
        }
    }

    /// Shown once after the page loads.
    pub fn startup_notice(&self) -> Notification {
        Notification::TotalProfit(format_number(self.store.total_profit()))
    }

    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut InventoryStore) -> Result<T, ShellError>,
    ) -> Result<T, ShellError> {
        let mut next = self.store.clone();
        let out = change(&mut next)?;
        self.snapshots.save(&next).inspect_err(|e| {
            tracing::error!(error = %e, "failed to persist inventory, change discarded");
        })?;
        self.store = next;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use stockbook_infra::InMemoryStorage;

    fn widget_form() -> AddItemForm {
        AddItemForm {
            name: "Widget".to_string(),
            added_date_time: "2024-01-01T10:00".to_string(),
            cost_price: "2.00".to_string(),
            selling_price: "5.00".to_string(),
            quantity: "10".to_string(),
        }
    }

    fn shell_with_widget() -> (AppShell<InMemoryStorage>, ItemId) {
        let mut shell = AppShell::open(InMemoryStorage::new()).unwrap();
        let id = shell.submit_add(&widget_form()).unwrap();
        (shell, id)
    }

    #[test]
    fn sell_reports_amount_and_profit() {
        let (mut shell, id) = shell_with_widget();

        let notice = shell.sell(id, "4").unwrap();

        assert_eq!(notice.to_string(), "Sold 4 of Widget. Total Sold: 20. Profit: 12");
        assert_eq!(shell.store().get(id).unwrap().quantity(), 6);
        assert_eq!(shell.summary().total_profit, "12");
    }

    #[test]
    fn sell_messages_match_failure() {
        let (mut shell, id) = shell_with_widget();

        for raw in ["", "abc", "0", "-2"] {
            let err = shell.sell(id, raw).unwrap_err();
            assert_eq!(err.user_message(), "Please enter a valid quantity.", "input {raw:?}");
        }
        let err = shell.sell(id, "11").unwrap_err();
        assert_eq!(err.user_message(), "Quantity exceeds available stock.");
        assert_eq!(shell.store().total_profit(), Decimal::ZERO);
    }

    #[test]
    fn invalid_update_changes_nothing() {
        let (mut shell, id) = shell_with_widget();
        let before = shell.store().clone();
        let mut form = shell.edit_defaults(id).unwrap();
        form.cost_price = "cheap".to_string();

        let err = shell.update(id, &form).unwrap_err();

        assert_eq!(err.user_message(), "Invalid input. Item not updated.");
        assert_eq!(shell.store(), &before);
    }

    #[test]
    fn update_defaults_round_trip() {
        let (mut shell, id) = shell_with_widget();
        let before = shell.store().clone();
        let form = shell.edit_defaults(id).unwrap();

        let notice = shell.update(id, &form).unwrap();

        assert_eq!(notice, Notification::Updated);
        assert_eq!(shell.store(), &before);
    }

    #[test]
    fn delete_requires_confirmation() {
        let (mut shell, id) = shell_with_widget();

        assert_eq!(shell.delete(id, false).unwrap(), None);
        assert_eq!(shell.store().len(), 1);

        assert_eq!(shell.delete(id, true).unwrap(), Some(Notification::Deleted));
        assert!(shell.store().is_empty());

        let err = shell.delete(id, true).unwrap_err();
        assert!(matches!(err, ShellError::NotFound));
    }

    #[test]
    fn failed_save_rolls_back() {
        let (mut shell, id) = shell_with_widget();
        shell.snapshots().storage().fail_writes(true);

        let err = shell.sell(id, "4").unwrap_err();

        assert!(matches!(err, ShellError::Storage(_)));
        assert_eq!(shell.store().get(id).unwrap().quantity(), 10);
        assert_eq!(shell.store().total_profit(), Decimal::ZERO);
    }

    #[test]
    fn add_form_errors_are_reported() {
        let mut shell = AppShell::open(InMemoryStorage::new()).unwrap();

        let mut form = widget_form();
        form.quantity = String::new();
        let err = shell.submit_add(&form).unwrap_err();
        assert_eq!(err.user_message(), "Please fill in every field.");

        let mut form = widget_form();
        form.selling_price = "five".to_string();
        let err = shell.submit_add(&form).unwrap_err();
        assert!(matches!(err, ShellError::InvalidItem(FieldError::NotANumber { .. })));

        assert!(shell.store().is_empty());
    }

    #[test]
    fn rows_are_formatted_and_filtered() {
        let (mut shell, _) = shell_with_widget();
        let mut gadget = widget_form();
        gadget.name = "Gadget".to_string();
        gadget.cost_price = "1250".to_string();
        gadget.quantity = "2".to_string();
        shell.submit_add(&gadget).unwrap();

        let rows = shell.rows("GADG");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].cost_price, "1,250");
        assert_eq!(rows[0].total_cost, "2,500");
        assert_eq!(rows[0].profit, "0");

        assert_eq!(shell.rows("").len(), 2);
        assert_eq!(shell.summary().total_cost, "2,520");
    }

    #[test]
    fn startup_notice_shows_loaded_profit() {
        let (mut shell, id) = shell_with_widget();
        shell.sell(id, "10").unwrap();

        let reopened = AppShell::open(shell.close()).unwrap();

        assert_eq!(reopened.startup_notice().to_string(), "Total Profit: 30");
        assert!(reopened.store().is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        /// How a prompt answer is spoiled.
        #[derive(Debug, Clone)]
        enum Spoil {
            Blank,
            Word(String),
            Negative(u32),
        }

        fn spoil() -> impl Strategy<Value = Spoil> {
            prop_oneof![
                Just(Spoil::Blank),
                "[a-z]{1,8}".prop_map(|w| Spoil::Word(format!("x{w}"))),
                (1u32..1000).prop_map(Spoil::Negative),
            ]
        }

        /// Text fields can only be spoiled by leaving them blank.
        fn spoil_field(form: &mut EditItemForm, field: usize, how: &Spoil) {
            let bad = match how {
                Spoil::Blank => "  ".to_string(),
                Spoil::Word(word) => word.clone(),
                Spoil::Negative(n) => format!("-{n}"),
            };
            match field {
                0 => form.name = "  ".to_string(),
                1 => form.cost_price = bad,
                2 => form.selling_price = bad,
                3 => form.quantity = bad,
                _ => form.added_date_time = String::new(),
            }
        }

        fn saved_snapshot(shell: &AppShell<InMemoryStorage>) -> (Option<String>, Option<String>) {
            let keys = StorageKeys::default();
            let storage = shell.snapshots().storage();
            (
                storage.get(&keys.inventory).unwrap(),
                storage.get(&keys.profit).unwrap(),
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: a rejected update leaves memory and storage as they were.
            #[test]
            fn invalid_update_leaves_state_unchanged(
                field in 0usize..5,
                how in spoil(),
                sold in 0u32..10,
            ) {
                let (mut shell, id) = shell_with_widget();
                if sold > 0 {
                    shell.sell(id, &sold.to_string()).unwrap();
                }
                let before = shell.store().clone();
                let saved = saved_snapshot(&shell);

                let mut form = shell.edit_defaults(id).unwrap();
                spoil_field(&mut form, field, &how);
                let err = shell.update(id, &form).unwrap_err();

                prop_assert_eq!(err.user_message(), "Invalid input. Item not updated.");
                prop_assert_eq!(shell.store(), &before);
                prop_assert_eq!(saved_snapshot(&shell), saved);
            }
        }
    }
}
