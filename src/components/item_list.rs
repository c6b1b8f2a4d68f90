//! Item List Component
//!
//! Every item with the container it currently sits in.

use leptos::prelude::*;
use leptos::task::spawn_local;
use sortbox_sync::Item;

use crate::components::DeleteConfirmButton;
use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

const UNSORTED_COLOR: &str = "#666";

#[component]
pub fn ItemList() -> impl IntoView {
    let store = use_app_store();
    let load = Memo::new(move |_| store.items_load().get());

    move || {
        let load = load.get();
        if let Some(error) = load.error() {
            return view! { <div class="error">"Error: " {error.to_string()}</div> }.into_any();
        }
        if load.is_loading() {
            return view! { <div class="loading">"Loading items..."</div> }.into_any();
        }

        // Keyed on the whole row: a row is rebuilt only when its item or
        // resolved container changes.
        view! {
            <ul class="item-list">
                <For
                    each=move || store.items().get()
                    key=|item| item.clone()
                    children=|item| view! { <ItemRow item=item /> }
                />
            </ul>
        }
        .into_any()
    }
}

#[component]
fn ItemRow(item: Item) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (error, set_error) = signal::<Option<String>>(None);

    let (container_name, color) = match &item.container {
        Some(container) => (container.name.clone(), container.color.clone()),
        None => ("Unknown container".to_string(), UNSORTED_COLOR.to_string()),
    };

    let detail_id = item.id.clone();
    let id = item.id.clone();
    let on_delete = Callback::new(move |_: ()| {
        let id = id.clone();
        let session = ctx.session();
        spawn_local(async move {
            if let Err(e) = session.delete_item(&id).await {
                if !e.is_cancelled() {
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    });

    view! {
        <li class="item-row" style=format!("border-left-color: {};", color)>
            <strong class="item-name" on:click=move |_| ctx.view_item(Some(detail_id.clone()))>
                {item.name}
            </strong>
            <span class="item-container">{container_name}</span>
            <DeleteConfirmButton button_class="delete-btn" label="×" on_confirm=on_delete />
            {move || error.get().map(|e| view! { <span class="error">{e}</span> })}
        </li>
    }
}
