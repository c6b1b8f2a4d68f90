//! Entity Stores
//!
//! Ordered in-memory collections keyed by entity id. Order is the server's
//! order after a full load; creations land at the front or the back
//! depending on the entity type.

use crate::domain::{Entity, InsertAt};

/// Ordered collection of entities with unique ids
#[derive(Debug, Clone, PartialEq)]
pub struct EntityStore<E: Entity> {
    entries: Vec<E>,
}

impl<E: Entity> Default for EntityStore<E> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<E: Entity> EntityStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with a freshly fetched list, keeping its order.
    ///
    /// Duplicate ids here mean the API broke its contract; they are kept as
    /// given and logged.
    pub fn replace_all(&mut self, entities: Vec<E>) {
        if let Some(dup) = first_duplicate(&entities) {
            log::warn!("[Store] replace_all received duplicate id {:?}", dup);
        }
        self.entries = entities;
    }

    /// Insert where this entity type puts new records.
    pub fn insert(&mut self, entity: E) {
        match E::INSERT_AT {
            InsertAt::Front => self.insert_front(entity),
            InsertAt::Back => self.insert_back(entity),
        }
    }

    /// Prepend. An entity whose id is already present replaces it in place.
    pub fn insert_front(&mut self, entity: E) {
        if let Some(existing) = self.position(entity.id()) {
            self.entries[existing] = entity;
        } else {
            self.entries.insert(0, entity);
        }
    }

    /// Append. An entity whose id is already present replaces it in place.
    pub fn insert_back(&mut self, entity: E) {
        if let Some(existing) = self.position(entity.id()) {
            self.entries[existing] = entity;
        } else {
            self.entries.push(entity);
        }
    }

    /// Remove by id. Absent ids are a no-op.
    pub fn remove_by_id(&mut self, id: &E::Id) -> Option<E> {
        self.position(id).map(|index| self.entries.remove(index))
    }

    /// Replace the matching entity with `updater(&entity)`. Returns false if absent.
    pub fn update_by_id(&mut self, id: &E::Id, updater: impl FnOnce(&E) -> E) -> bool {
        match self.position(id) {
            Some(index) => {
                let updated = updater(&self.entries[index]);
                self.entries[index] = updated;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &E::Id) -> Option<&E> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: &E::Id) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.entries
    }

    pub fn to_vec(&self) -> Vec<E> {
        self.entries.clone()
    }

    fn position(&self, id: &E::Id) -> Option<usize> {
        self.entries.iter().position(|e| e.id() == id)
    }
}

fn first_duplicate<E: Entity>(entities: &[E]) -> Option<&E::Id> {
    entities
        .iter()
        .enumerate()
        .find(|(i, e)| entities[..*i].iter().any(|prev| prev.id() == e.id()))
        .map(|(_, e)| e.id())
}
