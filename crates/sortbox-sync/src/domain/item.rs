//! Item Entity

use serde::{Deserialize, Serialize};

use super::container::ContainerSnapshot;
use super::entity::{Entity, InsertAt};

/// An item assigned to a container
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    /// Foreign key into the containers collection
    pub container_id: String,
    /// Denormalized container, resolved by the server or by the merge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerSnapshot>,
}

impl Entity for Item {
    type Id = String;

    const INSERT_AT: InsertAt = InsertAt::Back;

    fn id(&self) -> &String {
        &self.id
    }
}

/// The part of an item cached inside `Container::items`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: String,
    pub name: String,
}

impl From<&Item> for ItemRef {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
        }
    }
}

/// Body of `POST /api/items`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    pub container_id: String,
}

/// One row of the search panel
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchResult {
    pub item_name: String,
    pub container: ContainerSnapshot,
}
