//! Advert Entity

use serde::{Deserialize, Serialize};

use super::entity::{Entity, InsertAt};

/// An entry of the advert feed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Advert {
    pub id: u64,
    pub title: String,
    pub description: String,
    /// Photo URL
    pub photo: String,
}

impl Entity for Advert {
    type Id = u64;

    const INSERT_AT: InsertAt = InsertAt::Front;

    fn id(&self) -> &u64 {
        &self.id
    }
}

/// Body of `POST /api/advert` and `PUT /api/advert/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvertFields {
    pub title: String,
    pub description: String,
    pub photo: String,
}

impl From<&Advert> for AdvertFields {
    fn from(advert: &Advert) -> Self {
        Self {
            title: advert.title.clone(),
            description: advert.description.clone(),
            photo: advert.photo.clone(),
        }
    }
}
