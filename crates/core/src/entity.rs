//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// An inventory record stays the same entity while its name, prices and
/// quantity are edited or sold down.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
