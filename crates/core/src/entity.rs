//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Products and banners are entities: the cart refers to them by id only.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
