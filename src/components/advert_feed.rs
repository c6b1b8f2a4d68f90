//! Advert Feed Component
//!
//! Newest-first list of adverts with edit and delete.

use leptos::prelude::*;
use leptos::task::spawn_local;
use sortbox_sync::Advert;

use crate::components::{DeleteConfirmButton, EditAdvertForm, NewAdvertForm};
use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn AdvertFeed() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let load = Memo::new(move |_| store.adverts_load().get());

    view! {
        <section class="advert-feed">
            {move || match ctx.editing_advert.get() {
                Some(id) => view! { <EditAdvertForm id=id /> }.into_any(),
                None => view! { <NewAdvertForm /> }.into_any(),
            }}
            {move || {
                let load = load.get();
                if let Some(error) = load.error() {
                    return view! { <div class="error">"Error: " {error.to_string()}</div> }.into_any();
                }
                if load.is_loading() {
                    return view! { <div class="loading">"Loading adverts..."</div> }.into_any();
                }
                view! {
                    <ul class="advert-list">
                        <For
                            each=move || store.adverts().get()
                            key=|advert| advert.clone()
                            children=|advert| view! { <AdvertCard advert=advert /> }
                        />
                    </ul>
                }
                .into_any()
            }}
        </section>
    }
}

#[component]
fn AdvertCard(advert: Advert) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (error, set_error) = signal::<Option<String>>(None);
    let id = advert.id;

    let on_delete = Callback::new(move |_: ()| {
        let session = ctx.session();
        spawn_local(async move {
            match session.delete_advert(id).await {
                Ok(()) => {
                    if ctx.editing_advert.get_untracked() == Some(id) {
                        ctx.edit_advert(None);
                    }
                }
                Err(e) if e.is_cancelled() => {}
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    });

    view! {
        <li class="advert-card">
            <img src=advert.photo.clone() alt=advert.title.clone() />
            <div class="advert-body">
                <h3>{advert.title.clone()}</h3>
                <p>{advert.description.clone()}</p>
            </div>
            <div class="advert-actions">
                <button type="button" on:click=move |_| ctx.edit_advert(Some(id))>"Edit"</button>
                <DeleteConfirmButton button_class="delete-btn" on_confirm=on_delete />
            </div>
            {move || error.get().map(|e| view! { <p class="error">{e}</p> })}
        </li>
    }
}
