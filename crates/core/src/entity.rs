//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy
        + Eq
        + Ord
        + core::hash::Hash
        + core::fmt::Debug
        + core::fmt::Display
        + From<i64>
        + Into<i64>;

    /// Singular name used in messages (e.g. `"attraction"`).
    const KIND: &'static str;

    /// Collection name used in routes and self links (e.g. `"attractions"`).
    const COLLECTION: &'static str;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
