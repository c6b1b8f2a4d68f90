//! Domain Layer - Core Entity Trait
//!
//! Every collection the client keeps in memory is a sequence of entities
//! keyed by a unique id.

/// Where a freshly created entity lands in its store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAt {
    /// Most-recent-first feeds
    Front,
    /// Stable listings
    Back,
}

/// Core trait for all domain entities
pub trait Entity: Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::fmt::Debug;

    /// Placement of newly created entities
    const INSERT_AT: InsertAt;

    /// Returns the entity's unique identifier
    fn id(&self) -> &Self::Id;
}
