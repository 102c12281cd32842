use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockbook_core::{Entity, ItemId, ValueObject};

/// One inventory line: prices, stock on hand and the profit realized so far.
///
/// The serialized shape (camelCase keys) is the persisted record layout.
/// Records written before ids existed get a fresh id when read back. Numeric
/// fields that older data stored as `null`, text or a negative count are read
/// as zero, so one bad record never blocks the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    id: ItemId,
    #[serde(rename = "itemName")]
    name: String,
    added_date_time: String,
    #[serde(deserialize_with = "lenient::amount")]
    cost_price: Decimal,
    #[serde(deserialize_with = "lenient::amount")]
    selling_price: Decimal,
    #[serde(deserialize_with = "lenient::count")]
    quantity: u32,
    #[serde(default, deserialize_with = "lenient::amount")]
    profit: Decimal,
}

impl Item {
    pub(crate) fn create(id: ItemId, new: NewItem) -> Self {
        Self {
            id,
            name: new.name,
            added_date_time: new.added_date_time,
            cost_price: new.cost_price,
            selling_price: new.selling_price,
            quantity: new.quantity,
            profit: Decimal::ZERO,
        }
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn added_date_time(&self) -> &str {
        &self.added_date_time
    }

    pub fn cost_price(&self) -> Decimal {
        self.cost_price
    }

    pub fn selling_price(&self) -> Decimal {
        self.selling_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Cumulative margin realized from sales of this item.
    pub fn profit(&self) -> Decimal {
        self.profit
    }

    /// Cost of the stock on hand (`cost_price × quantity`).
    pub fn total_cost(&self) -> Decimal {
        self.cost_price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Case-insensitive substring match on the name.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn name_matches(&self, needle: &str) -> bool {
        needle.is_empty() || self.name.to_lowercase().contains(needle)
    }

    /// Take `quantity` units out of stock and set the accumulated profit.
    pub(crate) fn record_sale(&mut self, quantity: u32, profit_after: Decimal) {
        self.quantity -= quantity;
        self.profit = profit_after;
    }

    pub(crate) fn apply_edit(&mut self, edit: ItemEdit) {
        self.name = edit.name;
        self.cost_price = edit.cost_price;
        self.selling_price = edit.selling_price;
        self.quantity = edit.quantity;
        self.added_date_time = edit.added_date_time;
    }
}

/// Tolerant readers for numeric record fields.
mod lenient {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Exact(Decimal),
        Float(f64),
        Text(String),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Whole(i64),
        Float(f64),
        Text(String),
    }

    /// A decimal amount; `null` or anything non-numeric reads as zero.
    pub(super) fn amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let shown = match Option::<Amount>::deserialize(deserializer)? {
            Some(Amount::Exact(value)) => return Ok(value),
            Some(Amount::Float(value)) => value.to_string(),
            Some(Amount::Text(value)) => value,
            None => "null".to_string(),
        };
        tracing::warn!(value = %shown, "unreadable amount in saved item, using zero");
        Ok(Decimal::ZERO)
    }

    /// A stock count; `null`, negative or non-whole values read as zero.
    pub(super) fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let shown = match Option::<Count>::deserialize(deserializer)? {
            Some(Count::Whole(n)) => match u32::try_from(n) {
                Ok(n) => return Ok(n),
                Err(_) => n.to_string(),
            },
            Some(Count::Text(text)) => match text.trim().parse::<u32>() {
                Ok(n) => return Ok(n),
                Err(_) => text,
            },
            Some(Count::Float(value)) => value.to_string(),
            None => "null".to_string(),
        };
        tracing::warn!(value = %shown, "unreadable quantity in saved item, using zero");
        Ok(0)
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Fields for a new inventory line (profit always starts at zero).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub added_date_time: String,
    pub cost_price: Decimal,
    pub selling_price: Decimal,
    pub quantity: u32,
}

impl ValueObject for NewItem {}

/// Full replacement of an item's editable fields.
///
/// Only constructible from already-parsed values, so an edit is either
/// applied whole or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEdit {
    pub name: String,
    pub cost_price: Decimal,
    pub selling_price: Decimal,
    pub quantity: u32,
    pub added_date_time: String,
}

impl ValueObject for ItemEdit {}
