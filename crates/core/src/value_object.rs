//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**. They are defined entirely by their
//! attribute values, so two value objects with the same values are equal.

/// Marker trait for value objects.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: no identity (a parsed edit or a sale receipt)
/// - **Entity**: has identity (an inventory item keeps its `ItemId` while edited)
///
/// Value objects are immutable. To "modify" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct SaleReceipt {
///     quantity: u32,
///     sold_amount: Decimal,
/// }
///
/// impl ValueObject for SaleReceipt {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
