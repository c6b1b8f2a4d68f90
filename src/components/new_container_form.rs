//! New Container Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;
use sortbox_sync::NewContainer;

use crate::components::form_message::{FormMessage, FormMessageView};
use crate::context::AppContext;
use crate::validation::validate_container;

const DEFAULT_COLOR: &str = "#4a90d9";

#[component]
pub fn NewContainerForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let name = RwSignal::new(String::new());
    let color = RwSignal::new(DEFAULT_COLOR.to_string());
    let description = RwSignal::new(String::new());
    let (message, set_message) = signal::<Option<FormMessage>>(None);

    let create_container = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let fields = NewContainer {
            name: name.get().trim().to_string(),
            color: color.get(),
            description: description.get().trim().to_string(),
        };
        let errors = validate_container(&fields);
        if !errors.is_empty() {
            set_message.set(Some(FormMessage::Error(errors.to_string())));
            return;
        }

        let session = ctx.session();
        spawn_local(async move {
            match session.create_container(&fields).await {
                Ok(container) => {
                    name.set(String::new());
                    description.set(String::new());
                    set_message.set(Some(FormMessage::Success(format!(
                        "Container \"{}\" created!",
                        container.name
                    ))));
                }
                Err(e) => set_message.set(FormMessage::from_error(&e)),
            }
        });
    };

    view! {
        <form class="new-container-form" on:submit=create_container>
            <h2>"New Container"</h2>
            <input
                type="text"
                placeholder="Name"
                prop:value=move || name.get()
                on:input=move |ev| name.set(event_target_value(&ev))
            />
            <input
                type="color"
                prop:value=move || color.get()
                on:input=move |ev| color.set(event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="Description"
                prop:value=move || description.get()
                on:input=move |ev| description.set(event_target_value(&ev))
            />
            <button type="submit">"Create"</button>
            <FormMessageView message=message />
        </form>
    }
}
