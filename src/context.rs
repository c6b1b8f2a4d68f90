//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;
use sortbox_sync::{ReqwestTransport, SyncSession};

/// The session type used by the browser client
pub type Session = SyncSession<ReqwestTransport>;

/// Top-level views
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    Containers,
    Items,
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// The sync session (not `Send`, hence local storage)
    session: StoredValue<Session, LocalStorage>,
    /// Current page - read
    pub page: ReadSignal<Page>,
    /// Current page - write
    set_page: WriteSignal<Page>,
    /// Advert open in the editor - read
    pub editing_advert: ReadSignal<Option<u64>>,
    /// Advert open in the editor - write
    set_editing_advert: WriteSignal<Option<u64>>,
    /// Item shown in detail - read
    pub viewing_item: ReadSignal<Option<String>>,
    /// Item shown in detail - write
    set_viewing_item: WriteSignal<Option<String>>,
}

impl AppContext {
    pub fn new(
        session: Session,
        page: (ReadSignal<Page>, WriteSignal<Page>),
        editing_advert: (ReadSignal<Option<u64>>, WriteSignal<Option<u64>>),
        viewing_item: (ReadSignal<Option<String>>, WriteSignal<Option<String>>),
    ) -> Self {
        Self {
            session: StoredValue::new_local(session),
            page: page.0,
            set_page: page.1,
            editing_advert: editing_advert.0,
            set_editing_advert: editing_advert.1,
            viewing_item: viewing_item.0,
            set_viewing_item: viewing_item.1,
        }
    }

    /// Handle to the session, cheap to clone into tasks
    pub fn session(&self) -> Session {
        self.session.get_value()
    }

    pub fn navigate(&self, page: Page) {
        self.set_page.set(page);
    }

    pub fn edit_advert(&self, id: Option<u64>) {
        self.set_editing_advert.set(id);
    }

    pub fn view_item(&self, id: Option<String>) {
        self.set_viewing_item.set(id);
    }

    /// Load all three collections (each independently)
    pub fn load_all(&self) {
        let session = self.session();
        spawn_local(async move {
            let _ = session.load_containers().await;
        });
        let session = self.session();
        spawn_local(async move {
            let _ = session.load_items().await;
        });
        self.reload_adverts();
    }

    /// Refetch the advert feed
    pub fn reload_adverts(&self) {
        let session = self.session();
        spawn_local(async move {
            let _ = session.load_adverts().await;
        });
    }

    /// Cancel any pending search and empty its results
    pub fn clear_search(&self) {
        self.session.try_with_value(|session| session.clear_search());
    }

    /// End the session; safe to call after the owner is gone
    pub fn teardown(&self) {
        self.session.try_with_value(|session| session.teardown());
    }
}
