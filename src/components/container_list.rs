//! Container List Component
//!
//! One card per container with its cached items, an add-item form and a
//! delete button. Cards are keyed by id and read their container from the
//! store, so a commit never rebuilds a card (or its half-typed form).

use leptos::prelude::*;
use leptos::task::spawn_local;
use sortbox_sync::Container;

use crate::components::{DeleteConfirmButton, NewItemForm};
use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ContainerList() -> impl IntoView {
    let store = use_app_store();
    let load = Memo::new(move |_| store.containers_load().get());

    move || {
        let load = load.get();
        if let Some(error) = load.error() {
            return view! { <div class="error">"Error: " {error.to_string()}</div> }.into_any();
        }
        if load.is_loading() {
            return view! { <div class="loading">"Loading containers..."</div> }.into_any();
        }

        view! {
            <Show
                when=move || !store.containers().read().is_empty()
                fallback=|| view! { <div class="empty">"No containers yet."</div> }
            >
                <div class="container-list">
                    <For
                        each=move || store.containers().get()
                        key=|container| container.id.clone()
                        children=move |container| view! { <ContainerCard id=container.id /> }
                    />
                </div>
            </Show>
        }
        .into_any()
    }
}

#[component]
fn ContainerCard(id: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let (error, set_error) = signal::<Option<String>>(None);

    let key = id.clone();
    let container = Memo::new(move |_| {
        store.containers().read().iter().find(|c| c.id == key).cloned()
    });
    let field = move |get: fn(&Container) -> String| {
        move || container.with(|c| c.as_ref().map(get).unwrap_or_default())
    };

    let delete_id = id.clone();
    let on_delete = Callback::new(move |_: ()| {
        let id = delete_id.clone();
        let session = ctx.session();
        spawn_local(async move {
            match session.delete_container(&id).await {
                Ok(()) => {}
                Err(e) if e.is_cancelled() => {}
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    });

    view! {
        <div
            class="container-card"
            style=move || format!("background-color: {};", field(|c| c.color.clone())())
        >
            <div class="container-card-header">
                <div>
                    <h2>{field(|c| c.name.clone())}</h2>
                    <p>{field(|c| c.description.clone())}</p>
                </div>
                <DeleteConfirmButton button_class="delete-btn" on_confirm=on_delete />
            </div>
            {move || error.get().map(|e| view! { <p class="error">{e}</p> })}
            <Show
                when=move || container.with(|c| c.as_ref().is_some_and(|c| !c.items.is_empty()))
                fallback=|| view! { <p class="empty">"Empty"</p> }
            >
                <ul class="item-refs">
                    <For
                        each=move || container.with(|c| c.as_ref().map(|c| c.items.clone()).unwrap_or_default())
                        key=|item| item.clone()
                        children=|item| view! { <li>{item.name}</li> }
                    />
                </ul>
            </Show>
            <NewItemForm container_id=id />
        </div>
    }
}
