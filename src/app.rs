//! Sortbox Frontend App
//!
//! Builds the sync session, mirrors it into the store and lays out the pages.

use leptos::prelude::*;
use reactive_stores::Store;
use sortbox_sync::{ClientConfig, ReqwestTransport, SyncSession};

use crate::components::{AdvertFeed, ContainerList, ItemDetail, ItemList, NewContainerForm, SearchPanel};
use crate::context::{AppContext, Page};
use crate::store::{store_mirror, AppState};
use crate::timer::GlooTimer;

/// API origin: the page's own origin
fn api_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::default().with_base_url(api_origin());
    log::info!("[APP] API base {}", config.base_url);
    let session = SyncSession::new(ReqwestTransport::new(&config), GlooTimer, &config);

    // Store mirrors every committed session change
    let store = Store::new(AppState::default());
    session.subscribe(move |change, state| store_mirror(&store, change, state));
    provide_context(store);

    let (page, set_page) = signal(Page::Home);
    let (editing_advert, set_editing_advert) = signal::<Option<u64>>(None);
    let (viewing_item, set_viewing_item) = signal::<Option<String>>(None);
    let ctx = AppContext::new(
        session,
        (page, set_page),
        (editing_advert, set_editing_advert),
        (viewing_item, set_viewing_item),
    );
    provide_context(ctx);

    ctx.load_all();
    on_cleanup(move || ctx.teardown());

    let nav_button = move |target: Page, label: &'static str| {
        view! {
            <button
                class="nav-btn"
                class:active=move || page.get() == target
                on:click=move |_| ctx.navigate(target)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="app-layout">
            <nav class="nav-bar">
                {nav_button(Page::Home, "Home")}
                {nav_button(Page::Containers, "Containers")}
                {nav_button(Page::Items, "Items")}
            </nav>
            <main>
                {move || match page.get() {
                    Page::Home => view! {
                        <SearchPanel />
                        <AdvertFeed />
                    }
                    .into_any(),
                    Page::Containers => view! {
                        <NewContainerForm />
                        <ContainerList />
                    }
                    .into_any(),
                    Page::Items => match viewing_item.get() {
                        Some(id) => view! { <ItemDetail id=id /> }.into_any(),
                        None => view! { <ItemList /> }.into_any(),
                    },
                }}
            </main>
        </div>
    }
}
