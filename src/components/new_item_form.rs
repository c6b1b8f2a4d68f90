//! New Item Form Component
//!
//! Adds an item to one container.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::form_message::{FormMessage, FormMessageView};
use crate::context::AppContext;
use crate::validation::validate_item_name;

/// Form for creating an item inside `container_id`
#[component]
pub fn NewItemForm(container_id: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let container_id = StoredValue::new(container_id);

    let (new_name, set_new_name) = signal(String::new());
    let (message, set_message) = signal::<Option<FormMessage>>(None);
    let (submitting, set_submitting) = signal(false);

    let create_item = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get();
        if let Some(error) = validate_item_name(&name).get("name") {
            set_message.set(Some(FormMessage::Error(error.to_string())));
            return;
        }

        let session = ctx.session();
        let container_id = container_id.get_value();
        set_submitting.set(true);
        spawn_local(async move {
            match session.create_item(&container_id, &name).await {
                Ok(_) => {
                    set_new_name.set(String::new());
                    set_message.set(Some(FormMessage::Success("Item created!".to_string())));
                }
                Err(e) => set_message.set(FormMessage::from_error(&e)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form class="new-item-form" on:submit=create_item>
            <div class="new-item-row">
                <input
                    type="text"
                    placeholder="Add item..."
                    prop:value=move || new_name.get()
                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Adding..." } else { "Add" }}
                </button>
            </div>
            <FormMessageView message=message />
        </form>
    }
}
