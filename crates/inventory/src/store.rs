use rust_decimal::Decimal;

use stockbook_core::{DomainError, DomainResult, ItemId, ValueObject};

use crate::item::{Item, ItemEdit, NewItem};

/// Outcome of a successful sale, used for the user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleReceipt {
    pub item_id: ItemId,
    pub item_name: String,
    pub quantity: u32,
    pub sold_amount: Decimal,
    pub profit: Decimal,
    /// The sale emptied the stock and the item left the inventory.
    pub removed: bool,
}

impl ValueObject for SaleReceipt {}

/// The inventory: an insertion-ordered list of items plus the global profit.
///
/// Pure in-memory state. Persistence and user interaction live in the
/// storage and shell crates, which snapshot this value after each mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryStore {
    items: Vec<Item>,
    total_profit: Decimal,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a loaded snapshot.
    pub fn from_parts(items: Vec<Item>, total_profit: Decimal) -> Self {
        Self {
            items,
            total_profit,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cumulative margin across all sales of all items.
    pub fn total_profit(&self) -> Decimal {
        self.total_profit
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id_typed() == id)
    }

    /// Current position of an item in the list.
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id_typed() == id)
    }

    /// Id of the item currently at `index`.
    pub fn id_at(&self, index: usize) -> Option<ItemId> {
        self.items.get(index).map(Item::id_typed)
    }

    /// Append a new item. No checks beyond what parsing already did.
    pub fn add(&mut self, new: NewItem) -> ItemId {
        let id = ItemId::new();
        tracing::debug!(item_id = %id, name = %new.name, quantity = new.quantity, "item added");
        self.items.push(Item::create(id, new));
        id
    }

    /// Sell `requested` units of an item.
    ///
    /// Rejected without any state change when `requested` is not positive or
    /// exceeds the stock on hand. Selling the last unit removes the item.
    pub fn sell(&mut self, id: ItemId, requested: i64) -> DomainResult<SaleReceipt> {
        if requested <= 0 {
            return Err(DomainError::InvalidQuantity(requested));
        }

        let index = self.position(id).ok_or(DomainError::NotFound)?;
        let item = &self.items[index];

        let available = item.quantity();
        if requested > i64::from(available) {
            return Err(DomainError::InsufficientStock {
                requested,
                available,
            });
        }
        let quantity =
            u32::try_from(requested).map_err(|_| DomainError::InvalidQuantity(requested))?;

        let units = Decimal::from(quantity);
        let sold_amount = units
            .checked_mul(item.selling_price())
            .ok_or_else(|| DomainError::invariant("sale amount overflows"))?;
        let cost = units
            .checked_mul(item.cost_price())
            .ok_or_else(|| DomainError::invariant("sale cost overflows"))?;
        let profit = sold_amount
            .checked_sub(cost)
            .ok_or_else(|| DomainError::invariant("sale profit overflows"))?;
        let total_profit = self
            .total_profit
            .checked_add(profit)
            .ok_or_else(|| DomainError::invariant("total profit overflows"))?;
        let item_profit = item
            .profit()
            .checked_add(profit)
            .ok_or_else(|| DomainError::invariant("item profit overflows"))?;

        // All checks passed; mutate.
        let item = &mut self.items[index];
        item.record_sale(quantity, item_profit);
        self.total_profit = total_profit;

        let item_name = item.name().to_string();
        let removed = item.quantity() == 0;
        if removed {
            self.items.remove(index);
        }

        tracing::debug!(
            item_id = %id,
            quantity,
            %sold_amount,
            %profit,
            removed,
            "item sold"
        );

        Ok(SaleReceipt {
            item_id: id,
            item_name,
            quantity,
            sold_amount,
            profit,
            removed,
        })
    }

    /// Replace every editable field of an item at once.
    ///
    /// Setting the quantity to zero here keeps the item listed; only a sale
    /// removes sold-out items.
    pub fn edit(&mut self, id: ItemId, edit: ItemEdit) -> DomainResult<()> {
        let index = self.position(id).ok_or(DomainError::NotFound)?;
        tracing::debug!(item_id = %id, name = %edit.name, quantity = edit.quantity, "item edited");
        self.items[index].apply_edit(edit);
        Ok(())
    }

    /// Remove an item unconditionally. Other items keep their fields and order.
    pub fn delete(&mut self, id: ItemId) -> DomainResult<Item> {
        let index = self.position(id).ok_or(DomainError::NotFound)?;
        let removed = self.items.remove(index);
        tracing::debug!(item_id = %id, name = %removed.name(), "item deleted");
        Ok(removed)
    }

    /// Items whose name contains `filter`, ignoring case, in list order.
    pub fn query(&self, filter: &str) -> ItemQuery<'_> {
        ItemQuery {
            items: &self.items,
            needle: filter.to_lowercase(),
            next: 0,
        }
    }

    /// Cost of all stock on hand. Recomputed on every call.
    pub fn total_cost(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |sum, item| sum.saturating_add(item.total_cost()))
    }
}

/// Lazy filtered view over the inventory, yielding `(index, item)`.
///
/// Cloning or calling [`ItemQuery::restart`] replays the view from the start.
#[derive(Debug, Clone)]
pub struct ItemQuery<'a> {
    items: &'a [Item],
    needle: String,
    next: usize,
}

impl<'a> ItemQuery<'a> {
    pub fn restart(&mut self) {
        self.next = 0;
    }
}

impl<'a> Iterator for ItemQuery<'a> {
    type Item = (usize, &'a Item);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(item) = self.items.get(self.next) {
            let index = self.next;
            self.next += 1;
            if item.name_matches(&self.needle) {
                return Some((index, item));
            }
        }
        None
    }
}
