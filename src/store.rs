//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store is a
//! read-only mirror of the sync session: the session owns the data and
//! pushes every committed change here.

use leptos::prelude::*;
use reactive_stores::Store;
use sortbox_sync::{Advert, Change, Container, Item, LoadState, SearchState, SessionState};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// All containers, server order plus appended creations
    pub containers: Vec<Container>,
    /// All items with their container resolved
    pub items: Vec<Item>,
    /// Advert feed, newest first
    pub adverts: Vec<Advert>,
    pub containers_load: LoadState,
    pub items_load: LoadState,
    pub adverts_load: LoadState,
    /// Search box state and results
    pub search: SearchState,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Copy the part of the session named by `change` into the store
pub fn store_mirror(store: &AppStore, change: Change, state: &SessionState) {
    match change {
        Change::Containers => {
            *store.containers().write() = state.containers.to_vec();
            *store.containers_load().write() = state.containers_load.clone();
            // Container edits re-resolve the items view.
            *store.items().write() = state.resolved_items.clone();
        }
        Change::Items => {
            *store.items().write() = state.resolved_items.clone();
            *store.items_load().write() = state.items_load.clone();
        }
        Change::Adverts => {
            *store.adverts().write() = state.adverts.to_vec();
            *store.adverts_load().write() = state.adverts_load.clone();
        }
        Change::Search => {
            *store.search().write() = state.search.clone();
        }
    }
}
