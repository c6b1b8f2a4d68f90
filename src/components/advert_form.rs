//! Advert Form Components
//!
//! Create and edit forms sharing one set of inputs.

use leptos::prelude::*;
use leptos::task::spawn_local;
use sortbox_sync::AdvertFields;

use crate::components::form_message::{FormMessage, FormMessageView};
use crate::context::AppContext;
use crate::validation::validate_advert;

/// Signals behind the three advert inputs
#[derive(Clone, Copy)]
struct AdvertDraft {
    title: RwSignal<String>,
    description: RwSignal<String>,
    photo: RwSignal<String>,
}

impl AdvertDraft {
    fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            photo: RwSignal::new(String::new()),
        }
    }

    fn fill(&self, fields: AdvertFields) {
        self.title.set(fields.title);
        self.description.set(fields.description);
        self.photo.set(fields.photo);
    }

    fn fields(&self) -> AdvertFields {
        AdvertFields {
            title: self.title.get().trim().to_string(),
            description: self.description.get().trim().to_string(),
            photo: self.photo.get().trim().to_string(),
        }
    }

    /// Validated fields, or the banner to show instead
    fn checked(&self) -> Result<AdvertFields, FormMessage> {
        let fields = self.fields();
        let errors = validate_advert(&fields);
        if errors.is_empty() {
            Ok(fields)
        } else {
            Err(FormMessage::Error(errors.to_string()))
        }
    }
}

#[component]
fn AdvertInputs(draft: AdvertDraft) -> impl IntoView {
    view! {
        <input
            type="text"
            placeholder="Title"
            prop:value=move || draft.title.get()
            on:input=move |ev| draft.title.set(event_target_value(&ev))
        />
        <textarea
            placeholder="Description"
            prop:value=move || draft.description.get()
            on:input=move |ev| draft.description.set(event_target_value(&ev))
        ></textarea>
        <input
            type="url"
            placeholder="Photo URL"
            prop:value=move || draft.photo.get()
            on:input=move |ev| draft.photo.set(event_target_value(&ev))
        />
    }
}

/// Post a new advert; it lands at the top of the feed
#[component]
pub fn NewAdvertForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let draft = AdvertDraft::new();
    let (message, set_message) = signal::<Option<FormMessage>>(None);

    let create_advert = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let fields = match draft.checked() {
            Ok(fields) => fields,
            Err(banner) => return set_message.set(Some(banner)),
        };
        let session = ctx.session();
        spawn_local(async move {
            match session.create_advert(&fields).await {
                Ok(_) => {
                    draft.fill(AdvertFields::default());
                    set_message.set(Some(FormMessage::Success("Advert created!".to_string())));
                }
                Err(e) => set_message.set(FormMessage::from_error(&e)),
            }
        });
    };

    view! {
        <form class="advert-form" on:submit=create_advert>
            <h2>"New Advert"</h2>
            <AdvertInputs draft=draft />
            <button type="submit">"Post"</button>
            <FormMessageView message=message />
        </form>
    }
}

/// Edit an existing advert, then reload the feed
#[component]
pub fn EditAdvertForm(id: u64) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let draft = AdvertDraft::new();
    let (loaded, set_loaded) = signal(false);
    let (message, set_message) = signal::<Option<FormMessage>>(None);

    let session = ctx.session();
    spawn_local(async move {
        match session.fetch_advert(id).await {
            Ok(advert) => {
                draft.fill(AdvertFields::from(&advert));
                set_loaded.set(true);
            }
            Err(e) if e.is_cancelled() => {}
            Err(e) => set_message.set(Some(FormMessage::Error(e.to_string()))),
        }
    });

    let save_advert = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let fields = match draft.checked() {
            Ok(fields) => fields,
            Err(banner) => return set_message.set(Some(banner)),
        };
        let session = ctx.session();
        spawn_local(async move {
            match session.update_advert(id, &fields).await {
                Ok(_) => {
                    ctx.reload_adverts();
                    ctx.edit_advert(None);
                }
                Err(e) => set_message.set(FormMessage::from_error(&e)),
            }
        });
    };

    view! {
        <form class="advert-form editing" on:submit=save_advert>
            <h2>"Edit Advert"</h2>
            <Show when=move || loaded.get() fallback=|| view! { <div class="loading">"Loading advert..."</div> }>
                <AdvertInputs draft=draft />
                <button type="submit">"Save"</button>
            </Show>
            <button type="button" class="cancel-btn" on:click=move |_| ctx.edit_advert(None)>
                "Cancel"
            </button>
            <FormMessageView message=message />
        </form>
    }
}
