//! Mutation Orchestrator
//!
//! Create/update/delete against the API, committed to the stores only
//! after the server confirms. A failed call returns a display-ready
//! `MutationError` and leaves every store exactly as it was.
//!
//! Calls for different ids are independent. Calls for the same id are not
//! serialized: two deletes of one container both hit the API and the second
//! removal is a no-op. A commit marks any full-list load in flight for the
//! same collection stale, so that load refetches instead of overwriting it.

use crate::domain::{Advert, AdvertFields, Container, Item, NewContainer, NewItem};
use crate::error::{FetchResult, FieldErrors, MutationError, MutationResult};
use crate::gateway::Transport;
use crate::merge;
use crate::session::{ensure_live, Change, SyncSession};

impl<T: Transport + 'static> SyncSession<T> {
    // ========================
    // Containers
    // ========================

    /// Create a container and append it to the listing
    pub async fn create_container(&self, fields: &NewContainer) -> MutationResult<Container> {
        let token = self.operation_token();
        let container = self.gateway.create_container(fields, &token).await?;
        ensure_live(&token)?;

        log::info!("[Session] created container {}", container.id);
        self.commit_mutation(&[Change::Containers], |state| {
            state.containers.insert(container.clone());
        });
        Ok(container)
    }

    /// Delete a container once the server confirms
    pub async fn delete_container(&self, id: &str) -> MutationResult<()> {
        let token = self.operation_token();
        self.gateway.delete_container(id, &token).await?;
        ensure_live(&token)?;

        log::info!("[Session] deleted container {}", id);
        self.commit_mutation(&[Change::Containers], |state| {
            state.containers.remove_by_id(&id.to_string());
        });
        Ok(())
    }

    // ========================
    // Items
    // ========================

    /// Create an item in a container.
    ///
    /// On success the item is appended to the items listing and to the
    /// owning container's cached refs.
    pub async fn create_item(&self, container_id: &str, name: &str) -> MutationResult<Item> {
        let name = name.trim();
        if name.is_empty() {
            let mut errors = FieldErrors::new();
            errors.insert("name", "Name is required");
            return Err(MutationError::Invalid(errors));
        }

        let token = self.operation_token();
        let fields = NewItem {
            name: name.to_string(),
            container_id: container_id.to_string(),
        };
        let item = self.gateway.create_item(&fields, &token).await?;
        ensure_live(&token)?;

        log::info!("[Session] created item {} in {}", item.id, item.container_id);
        self.commit_mutation(&[Change::Items, Change::Containers], |state| {
            state.items.insert(item.clone());
            state
                .containers
                .update_by_id(&item.container_id, |container| merge::append_item_ref(container, &item));
        });
        Ok(item)
    }

    /// Delete an item once the server confirms, dropping it from its container's refs too
    pub async fn delete_item(&self, id: &str) -> MutationResult<()> {
        let token = self.operation_token();
        self.gateway.delete_item(id, &token).await?;
        ensure_live(&token)?;

        log::info!("[Session] deleted item {}", id);
        self.commit_mutation(&[Change::Items, Change::Containers], |state| {
            let owners: Vec<String> = match state.items.remove_by_id(&id.to_string()) {
                Some(item) => vec![item.container_id],
                None => state
                    .containers
                    .as_slice()
                    .iter()
                    .filter(|c| c.items.iter().any(|r| r.id == id))
                    .map(|c| c.id.clone())
                    .collect(),
            };
            for owner in owners {
                state
                    .containers
                    .update_by_id(&owner, |container| merge::remove_item_ref(container, id));
            }
        });
        Ok(())
    }

    /// Single item for the detail view. Does not touch the stores.
    pub async fn fetch_item(&self, id: &str) -> FetchResult<Item> {
        let token = self.operation_token();
        self.gateway.get_item(id, &token).await
    }

    // ========================
    // Adverts
    // ========================

    /// Create an advert and put it at the top of the feed
    pub async fn create_advert(&self, fields: &AdvertFields) -> MutationResult<Advert> {
        let token = self.operation_token();
        let advert = self.gateway.create_advert(fields, &token).await?;
        ensure_live(&token)?;

        log::info!("[Session] created advert {}", advert.id);
        self.commit_mutation(&[Change::Adverts], |state| {
            state.adverts.insert(advert.clone());
        });
        Ok(advert)
    }

    /// Update an advert. The feed is not patched; callers reload it.
    pub async fn update_advert(&self, id: u64, fields: &AdvertFields) -> MutationResult<Advert> {
        let token = self.operation_token();
        let advert = self.gateway.update_advert(id, fields, &token).await?;
        log::info!("[Session] updated advert {}", id);
        Ok(advert)
    }

    /// Delete an advert once the server confirms
    pub async fn delete_advert(&self, id: u64) -> MutationResult<()> {
        let token = self.operation_token();
        self.gateway.delete_advert(id, &token).await?;
        ensure_live(&token)?;

        log::info!("[Session] deleted advert {}", id);
        self.commit_mutation(&[Change::Adverts], |state| {
            state.adverts.remove_by_id(&id);
        });
        Ok(())
    }

    /// Single advert for the edit view. Does not touch the stores.
    pub async fn fetch_advert(&self, id: u64) -> FetchResult<Advert> {
        let token = self.operation_token();
        self.gateway.get_advert(id, &token).await
    }
}
