//! Sortbox Sync
//!
//! Client-side data synchronization for containers, items and adverts.
//!
//! The crate keeps three related collections consistent in memory while the
//! user creates, deletes and searches against the remote HTTP API. Everything
//! runs on one thread: state is shared through `Rc<RefCell<..>>`, futures are
//! `!Send`, and the only suspension points are gateway calls and the search
//! debounce.
//!
//! Entry point is [`SyncSession`], created once per browser session:
//!
//! ```ignore
//! let config = ClientConfig::default().with_base_url(origin);
//! let session = SyncSession::new(ReqwestTransport::new(&config), GlooTimer, &config);
//! session.subscribe(|change, state| { /* mirror into the view */ });
//! spawn_local(async move { let _ = session.load_containers().await; });
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod merge;
pub mod orchestrator;
pub mod search;
pub mod session;
pub mod store;

#[cfg(test)]
mod testing;

pub use config::ClientConfig;
pub use domain::{
    Advert, AdvertFields, Container, ContainerSnapshot, Entity, InsertAt, Item, ItemRef,
    NewContainer, NewItem, SearchResult,
};
pub use error::{FetchError, FetchResult, FieldErrors, MutationError, MutationResult, TransportError};
pub use gateway::{FetchGateway, HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use search::{SearchCoordinator, SearchOutcome, SearchState, SearchStatus, Timer};
pub use session::{Change, LoadState, SessionState, SyncSession};
pub use store::EntityStore;

pub use tokio_util::sync::CancellationToken;
