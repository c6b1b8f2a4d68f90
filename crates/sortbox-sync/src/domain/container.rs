//! Container Entity

use serde::{Deserialize, Deserializer, Serialize};

use super::entity::{Entity, InsertAt};
use super::item::ItemRef;

/// A category items are sorted into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub id: String,
    pub name: String,
    /// Display token (CSS color), passed through untouched
    pub color: String,
    pub description: String,
    /// Cached refs of the items in this container. Possibly stale,
    /// absent (or null) on the wire until the server populates it.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<ItemRef>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ItemRef>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ItemRef>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Entity for Container {
    type Id = String;

    const INSERT_AT: InsertAt = InsertAt::Back;

    fn id(&self) -> &String {
        &self.id
    }
}

/// Point-in-time copy of a container carried by items and search results
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerSnapshot {
    pub id: String,
    pub name: String,
    pub color: String,
    pub description: String,
}

impl From<&Container> for ContainerSnapshot {
    fn from(container: &Container) -> Self {
        Self {
            id: container.id.clone(),
            name: container.name.clone(),
            color: container.color.clone(),
            description: container.description.clone(),
        }
    }
}

/// Body of `POST /api/containers`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContainer {
    pub name: String,
    pub color: String,
    pub description: String,
}
