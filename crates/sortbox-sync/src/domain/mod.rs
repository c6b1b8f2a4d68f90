//! Domain Layer
//!
//! Wire entities of the Sortbox API and the core entity abstraction.
//! This layer has NO dependencies besides serde.

mod entity;
mod container;
mod item;
mod advert;

pub use entity::{Entity, InsertAt};
pub use container::{Container, ContainerSnapshot, NewContainer};
pub use item::{Item, ItemRef, NewItem, SearchResult};
pub use advert::{Advert, AdvertFields};
