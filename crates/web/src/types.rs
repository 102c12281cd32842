//! View models shared by the shell and the frontend.
//!
//! Everything here is already formatted for display; the frontend only
//! places strings into the page.

use stockbook_core::ItemId;

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub id: ItemId,
    /// Position in the full (unfiltered) inventory.
    pub index: usize,
    pub name: String,
    pub added_date_time: String,
    pub cost_price: String,
    pub selling_price: String,
    pub quantity: u32,
    /// `cost_price × quantity` for this row.
    pub total_cost: String,
    pub profit: String,
}

/// Totals shown under the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total_cost: String,
    pub total_profit: String,
}

/// Message shown to the user after a successful action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Sold {
        quantity: u32,
        item_name: String,
        sold_amount: String,
        profit: String,
    },
    Updated,
    Deleted,
    TotalProfit(String),
}

impl core::fmt::Display for Notification {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Notification::Sold {
                quantity,
                item_name,
                sold_amount,
                profit,
            } => write!(
                f,
                "Sold {quantity} of {item_name}. Total Sold: {sold_amount}. Profit: {profit}"
            ),
            Notification::Updated => f.write_str("Item updated successfully."),
            Notification::Deleted => f.write_str("Item deleted successfully."),
            Notification::TotalProfit(profit) => write!(f, "Total Profit: {profit}"),
        }
    }
}
