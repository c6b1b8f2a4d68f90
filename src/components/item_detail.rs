//! Item Detail Component
//!
//! One item fetched fresh from the server, with the container it belongs to.

use leptos::prelude::*;
use leptos::task::spawn_local;
use sortbox_sync::Item;

use crate::context::{AppContext, Page};

#[component]
pub fn ItemDetail(id: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (item, set_item) = signal::<Option<Item>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    let session = ctx.session();
    spawn_local(async move {
        match session.fetch_item(&id).await {
            Ok(loaded) => set_item.set(Some(loaded)),
            Err(e) if e.is_cancelled() => {}
            Err(e) => set_error.set(Some(e.to_string())),
        }
    });

    let back = move |_| ctx.view_item(None);
    let to_containers = move |_| {
        ctx.view_item(None);
        ctx.navigate(Page::Containers);
    };

    view! {
        <div class="item-detail">
            <button type="button" class="back-btn" on:click=back>"Back to items"</button>
            {move || {
                if let Some(e) = error.get() {
                    return view! { <div class="error">"Error: " {e}</div> }.into_any();
                }
                let Some(item) = item.get() else {
                    return view! { <div class="loading">"Loading..."</div> }.into_any();
                };
                view! {
                    <h1>{item.name}</h1>
                    {item.container.map(|container| view! {
                        <div class="container-card" style=format!("background-color: {};", container.color)>
                            <h2>{container.name}</h2>
                            <p>{container.description}</p>
                            <button type="button" class="link-btn" on:click=to_containers>
                                "Back to containers"
                            </button>
                        </div>
                    })}
                }
                .into_any()
            }}
        </div>
    }
}
