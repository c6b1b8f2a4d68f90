//! Success / error banner shared by the forms.

use leptos::prelude::*;
use sortbox_sync::MutationError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMessage {
    Success(String),
    Error(String),
}

impl FormMessage {
    /// Banner for a failed mutation; `None` when it was only cancelled
    pub fn from_error(error: &MutationError) -> Option<Self> {
        (!error.is_cancelled()).then(|| FormMessage::Error(error.to_string()))
    }
}

#[component]
pub fn FormMessageView(message: ReadSignal<Option<FormMessage>>) -> impl IntoView {
    move || {
        message.get().map(|message| match message {
            FormMessage::Success(text) => view! { <div class="form-message success">{text}</div> }.into_any(),
            FormMessage::Error(text) => view! { <div class="form-message error">{text}</div> }.into_any(),
        })
    }
}
