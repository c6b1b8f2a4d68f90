//! Search Panel Component
//!
//! "Which container does this go in?" Debounced item-name search.

use leptos::prelude::*;
use leptos::task::spawn_local;
use sortbox_sync::SearchStatus;

use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn SearchPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let (filter, set_filter) = signal(String::new());

    // The query lives with the input: leaving the page drops it.
    on_cleanup(move || ctx.clear_search());

    let on_input = move |ev: web_sys::Event| {
        let text = event_target_value(&ev);
        set_filter.set(text.clone());
        let search = ctx.session().search(&text);
        spawn_local(async move {
            let outcome = search.await;
            log::debug!("[SEARCH] {:?}", outcome);
        });
    };

    view! {
        <div class="search-panel">
            <h2>"Find the Right Container"</h2>
            <input
                type="text"
                placeholder="Search item name (e.g. newspaper)..."
                prop:value=move || filter.get()
                on:input=on_input
            />
            {move || {
                let search = store.search().get();
                match search.status {
                    SearchStatus::Pending => Some(view! { <div class="loading">"Searching..."</div> }.into_any()),
                    SearchStatus::Failed => search
                        .error
                        .map(|e| view! { <div class="error">"Error: " {e}</div> }.into_any()),
                    SearchStatus::Resolved if search.results.is_empty() => {
                        Some(view! { <div class="empty">"No matching containers found."</div> }.into_any())
                    }
                    _ => None,
                }
            }}
            <ul class="search-results">
                <For
                    each=move || store.search().get().results
                    key=|result| result.clone()
                    children=|result| {
                        view! {
                            <li
                                class="search-result"
                                style=format!("background-color: {};", result.container.color)
                            >
                                <h3>{result.item_name}</h3>
                                <p>{result.container.name}</p>
                                <p class="description">{result.container.description}</p>
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}
