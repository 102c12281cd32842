//! Free-text input from the add form and the row prompts, parsed into typed
//! values before anything touches the store.

use core::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::item::{ItemEdit, NewItem};

/// Why a single field could not be used.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("missing field: {0}")]
    Missing(&'static str),

    #[error("{field} is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("{0} cannot be negative")]
    Negative(&'static str),
}

fn required<'a>(field: &'static str, raw: &'a str) -> Result<&'a str, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(FieldError::Missing(field))
    } else {
        Ok(trimmed)
    }
}

/// Parse a non-negative price.
pub fn parse_price(field: &'static str, raw: &str) -> Result<Decimal, FieldError> {
    let text = required(field, raw)?;
    let value = Decimal::from_str(text).map_err(|_| FieldError::NotANumber {
        field,
        value: text.to_string(),
    })?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(FieldError::Negative(field));
    }
    Ok(value)
}

/// Parse a stock quantity (whole, non-negative units).
pub fn parse_quantity(field: &'static str, raw: &str) -> Result<u32, FieldError> {
    let text = required(field, raw)?;
    match text.parse::<i64>() {
        Ok(n) if n < 0 => Err(FieldError::Negative(field)),
        Ok(n) => u32::try_from(n).map_err(|_| FieldError::NotANumber {
            field,
            value: text.to_string(),
        }),
        Err(_) => Err(FieldError::NotANumber {
            field,
            value: text.to_string(),
        }),
    }
}

/// Parse the quantity typed into the sell prompt.
///
/// Only checks that it is a whole number; range checks against stock happen
/// in [`crate::InventoryStore::sell`].
pub fn parse_requested_quantity(raw: &str) -> Result<i64, FieldError> {
    let text = required("quantity", raw)?;
    text.parse::<i64>().map_err(|_| FieldError::NotANumber {
        field: "quantity",
        value: text.to_string(),
    })
}

/// Raw values of the add-item form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddItemForm {
    pub name: String,
    pub added_date_time: String,
    pub cost_price: String,
    pub selling_price: String,
    pub quantity: String,
}

impl AddItemForm {
    /// Only the numeric fields are checked; name and timestamp are taken as-is.
    pub fn parse(&self) -> Result<NewItem, FieldError> {
        Ok(NewItem {
            name: self.name.clone(),
            added_date_time: self.added_date_time.clone(),
            cost_price: parse_price("cost price", &self.cost_price)?,
            selling_price: parse_price("selling price", &self.selling_price)?,
            quantity: parse_quantity("quantity", &self.quantity)?,
        })
    }
}

/// Raw answers to the update prompts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditItemForm {
    pub name: String,
    pub cost_price: String,
    pub selling_price: String,
    pub quantity: String,
    pub added_date_time: String,
}

impl EditItemForm {
    /// Every field must be present and every number must parse.
    pub fn parse(&self) -> Result<ItemEdit, FieldError> {
        let name = required("name", &self.name)?.to_string();
        let cost_price = parse_price("cost price", &self.cost_price)?;
        let selling_price = parse_price("selling price", &self.selling_price)?;
        let quantity = parse_quantity("quantity", &self.quantity)?;
        let added_date_time = required("date and time", &self.added_date_time)?.to_string();

        Ok(ItemEdit {
            name,
            cost_price,
            selling_price,
            quantity,
            added_date_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_form() -> AddItemForm {
        AddItemForm {
            name: "Widget".to_string(),
            added_date_time: "2024-01-01T10:00".to_string(),
            cost_price: "2.00".to_string(),
            selling_price: " 5 ".to_string(),
            quantity: "10".to_string(),
        }
    }

    fn edit_form() -> EditItemForm {
        EditItemForm {
            name: "Widget".to_string(),
            cost_price: "2.5".to_string(),
            selling_price: "6".to_string(),
            quantity: "0".to_string(),
            added_date_time: "2024-02-01T09:30".to_string(),
        }
    }

    #[test]
    fn add_form_parses_numbers() {
        let item = add_form().parse().unwrap();
        assert_eq!(item.cost_price, Decimal::new(200, 2));
        assert_eq!(item.selling_price, Decimal::new(5, 0));
        assert_eq!(item.quantity, 10);
    }

    #[test]
    fn add_form_rejects_non_numeric_price() {
        let mut form = add_form();
        form.cost_price = "two".to_string();
        let err = form.parse().unwrap_err();
        match err {
            FieldError::NotANumber { field, value } => {
                assert_eq!(field, "cost price");
                assert_eq!(value, "two");
            }
            _ => panic!("Expected NotANumber error"),
        }
    }

    #[test]
    fn add_form_accepts_blank_name() {
        let mut form = add_form();
        form.name = String::new();
        assert!(form.parse().is_ok());
    }

    #[test]
    fn quantities_must_be_whole_and_non_negative() {
        assert_eq!(parse_quantity("quantity", "-1"), Err(FieldError::Negative("quantity")));
        assert!(matches!(
            parse_quantity("quantity", "1.5"),
            Err(FieldError::NotANumber { .. })
        ));
        assert_eq!(parse_quantity("quantity", "0"), Ok(0));
    }

    #[test]
    fn prices_cannot_be_negative() {
        assert_eq!(parse_price("cost price", "-0.01"), Err(FieldError::Negative("cost price")));
        assert_eq!(parse_price("cost price", "0"), Ok(Decimal::ZERO));
    }

    #[test]
    fn requested_quantity_keeps_sign_for_range_check() {
        assert_eq!(parse_requested_quantity("-4"), Ok(-4));
        assert_eq!(parse_requested_quantity(""), Err(FieldError::Missing("quantity")));
        assert!(parse_requested_quantity("four").is_err());
    }

    #[test]
    fn edit_form_requires_every_field() {
        assert!(edit_form().parse().is_ok());

        let mut form = edit_form();
        form.name = "   ".to_string();
        assert_eq!(form.parse(), Err(FieldError::Missing("name")));

        let mut form = edit_form();
        form.added_date_time = String::new();
        assert_eq!(form.parse(), Err(FieldError::Missing("date and time")));

        let mut form = edit_form();
        form.selling_price = "abc".to_string();
        assert!(form.parse().is_err());
    }
}
