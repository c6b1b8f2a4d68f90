//! UI Components
//!
//! Reusable Leptos components.

mod advert_feed;
mod advert_form;
mod container_list;
mod delete_confirm_button;
mod form_message;
mod item_detail;
mod item_list;
mod new_container_form;
mod new_item_form;
mod search_panel;

pub use advert_feed::AdvertFeed;
pub use advert_form::{EditAdvertForm, NewAdvertForm};
pub use container_list::ContainerList;
pub use delete_confirm_button::DeleteConfirmButton;
pub use item_detail::ItemDetail;
pub use item_list::ItemList;
pub use new_container_form::NewContainerForm;
pub use new_item_form::NewItemForm;
pub use search_panel::SearchPanel;
