//! Sync Session
//!
//! The explicit context object of the client: it owns the entity stores,
//! the resolved item view, load status per collection, the search state and
//! the change listeners. Create one per browser session and call
//! [`SyncSession::teardown`] when it ends.
//!
//! Every write goes through one synchronous commit: mutate, recompute the
//! merge if containers or items changed, release the borrow, notify.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::domain::{Advert, Container, Entity, Item};
use crate::error::{FetchError, FetchResult};
use crate::gateway::{FetchGateway, Transport};
use crate::merge;
use crate::search::{SearchCoordinator, SearchOutcome, SearchState, Timer};
use crate::store::EntityStore;

/// Which part of the session changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    Containers,
    Items,
    Adverts,
    Search,
}

/// Status of a full-list load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Terminal error shown in place of the list
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Everything the view renders from
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub containers: EntityStore<Container>,
    pub items: EntityStore<Item>,
    pub adverts: EntityStore<Advert>,
    /// Items with `container` resolved against the live containers
    pub resolved_items: Vec<Item>,
    pub containers_load: LoadState,
    pub items_load: LoadState,
    pub adverts_load: LoadState,
    pub search: SearchState,
}

impl SessionState {
    fn refresh_resolved(&mut self) {
        self.resolved_items = merge::resolve_items(self.containers.as_slice(), self.items.as_slice());
    }

    fn load_state_mut(&mut self, change: Change) -> Option<&mut LoadState> {
        match change {
            Change::Containers => Some(&mut self.containers_load),
            Change::Items => Some(&mut self.items_load),
            Change::Adverts => Some(&mut self.adverts_load),
            Change::Search => None,
        }
    }
}

type Listener = Rc<dyn Fn(Change, &SessionState)>;

/// State plus listeners, shared by the session and the search coordinator
#[derive(Default)]
pub(crate) struct Shared {
    state: RefCell<SessionState>,
    listeners: RefCell<Vec<Listener>>,
}

impl Shared {
    /// Apply `f` atomically, then notify listeners of `changes`.
    ///
    /// Listeners run with the state borrowed; they must not commit.
    pub(crate) fn commit<R>(&self, changes: &[Change], f: impl FnOnce(&mut SessionState) -> R) -> R {
        let result = {
            let mut state = self.state.borrow_mut();
            let result = f(&mut state);
            if changes.iter().any(|c| matches!(c, Change::Containers | Change::Items)) {
                state.refresh_resolved();
            }
            result
        };
        self.notify(changes);
        result
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&self.state.borrow())
    }

    fn notify(&self, changes: &[Change]) {
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        if listeners.is_empty() {
            return;
        }
        let state = self.state.borrow();
        for change in changes {
            for listener in &listeners {
                listener(*change, &state);
            }
        }
    }
}

/// Client session: stores, search and the operations that change them
pub struct SyncSession<T> {
    pub(crate) gateway: Rc<FetchGateway<T>>,
    pub(crate) shared: Rc<Shared>,
    search: SearchCoordinator<T>,
    lifetime: CancellationToken,
    load_slots: Rc<RefCell<HashMap<Change, LoadSlot>>>,
}

/// The full-list load currently in flight for one collection
struct LoadSlot {
    token: CancellationToken,
    /// A mutation committed to the collection after the request went out
    stale: bool,
}

impl<T> Clone for SyncSession<T> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            shared: self.shared.clone(),
            search: self.search.clone(),
            lifetime: self.lifetime.clone(),
            load_slots: self.load_slots.clone(),
        }
    }
}

impl<T: Transport + 'static> SyncSession<T> {
    pub fn new(transport: T, timer: impl Timer + 'static, config: &ClientConfig) -> Self {
        let gateway = Rc::new(FetchGateway::new(transport));
        let shared = Rc::new(Shared::default());
        let lifetime = CancellationToken::new();
        let search = SearchCoordinator::new(
            gateway.clone(),
            Rc::new(timer),
            shared.clone(),
            config.search_debounce(),
            lifetime.clone(),
        );

        log::info!("[Session] started, search debounce {:?}", config.search_debounce());

        Self {
            gateway,
            shared,
            search,
            lifetime,
            load_slots: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Register a change listener. Listeners are dropped on teardown.
    pub fn subscribe(&self, listener: impl Fn(Change, &SessionState) + 'static) {
        self.shared.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Read the current state
    pub fn with_state<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        self.shared.read(f)
    }

    pub fn containers(&self) -> Vec<Container> {
        self.with_state(|s| s.containers.to_vec())
    }

    pub fn items(&self) -> Vec<Item> {
        self.with_state(|s| s.items.to_vec())
    }

    pub fn resolved_items(&self) -> Vec<Item> {
        self.with_state(|s| s.resolved_items.clone())
    }

    pub fn adverts(&self) -> Vec<Advert> {
        self.with_state(|s| s.adverts.to_vec())
    }

    pub fn search_state(&self) -> SearchState {
        self.with_state(|s| s.search.clone())
    }

    /// Feed a change of the search box text. Spawn the returned future.
    pub fn search(&self, text: &str) -> impl Future<Output = SearchOutcome> + 'static {
        self.search.query_changed(text)
    }

    /// Abandon the current search, e.g. when the search box goes away.
    pub fn clear_search(&self) {
        self.search.clear();
    }

    /// End the session: cancel all in-flight work and drop listeners.
    pub fn teardown(&self) {
        log::info!("[Session] teardown");
        self.lifetime.cancel();
        self.search.cancel();
        self.shared.listeners.borrow_mut().clear();
    }

    pub fn is_closed(&self) -> bool {
        self.lifetime.is_cancelled()
    }

    /// Token for one operation, cancelled with the session
    pub(crate) fn operation_token(&self) -> CancellationToken {
        self.lifetime.child_token()
    }

    // ========================
    // Full-list loaders
    // ========================

    pub async fn load_containers(&self) -> FetchResult<usize> {
        let gateway = self.gateway.clone();
        self.run_load(
            Change::Containers,
            move |token| {
                let gateway = gateway.clone();
                async move { gateway.list_containers(&token).await }
            },
            |state| &mut state.containers,
        )
        .await
    }

    pub async fn load_items(&self) -> FetchResult<usize> {
        let gateway = self.gateway.clone();
        self.run_load(
            Change::Items,
            move |token| {
                let gateway = gateway.clone();
                async move { gateway.list_items(&token).await }
            },
            |state| &mut state.items,
        )
        .await
    }

    pub async fn load_adverts(&self) -> FetchResult<usize> {
        let gateway = self.gateway.clone();
        self.run_load(
            Change::Adverts,
            move |token| {
                let gateway = gateway.clone();
                async move { gateway.list_adverts(&token).await }
            },
            |state| &mut state.adverts,
        )
        .await
    }

    /// Fetch a full list and publish it.
    ///
    /// A response that left before a mutation was committed to the same
    /// collection would drop that mutation, so it is discarded and the list
    /// fetched again.
    async fn run_load<E, F, Fut>(
        &self,
        change: Change,
        fetch: F,
        store: impl Fn(&mut SessionState) -> &mut EntityStore<E>,
    ) -> FetchResult<usize>
    where
        E: Entity,
        F: Fn(CancellationToken) -> Fut,
        Fut: Future<Output = FetchResult<Vec<E>>>,
    {
        loop {
            let token = self.begin_load(change);
            let result = fetch(token.clone()).await;
            if !token.is_cancelled() && self.take_stale(change) {
                log::debug!("[Session] {:?} changed during load, refetching", change);
                continue;
            }
            return self.finish_load(change, &token, result, &store);
        }
    }

    /// Mark the collection loading and supersede any load still in flight for it.
    fn begin_load(&self, change: Change) -> CancellationToken {
        let token = self.operation_token();
        let slot = LoadSlot {
            token: token.clone(),
            stale: false,
        };
        if let Some(previous) = self.load_slots.borrow_mut().insert(change, slot) {
            previous.token.cancel();
        }
        self.shared.commit(&[change], |state| {
            if let Some(load) = state.load_state_mut(change) {
                *load = LoadState::Loading;
            }
        });
        token
    }

    fn take_stale(&self, change: Change) -> bool {
        match self.load_slots.borrow_mut().get_mut(&change) {
            Some(slot) => std::mem::replace(&mut slot.stale, false),
            None => false,
        }
    }

    /// Commit a confirmed mutation, invalidating loads in flight for the
    /// collections it touches.
    pub(crate) fn commit_mutation<R>(&self, changes: &[Change], f: impl FnOnce(&mut SessionState) -> R) -> R {
        {
            let mut slots = self.load_slots.borrow_mut();
            for change in changes {
                if let Some(slot) = slots.get_mut(change) {
                    slot.stale = true;
                }
            }
        }
        self.shared.commit(changes, f)
    }

    fn finish_load<E: Entity>(
        &self,
        change: Change,
        token: &CancellationToken,
        result: FetchResult<Vec<E>>,
        store: impl Fn(&mut SessionState) -> &mut EntityStore<E>,
    ) -> FetchResult<usize> {
        // A superseded or torn-down load leaves the state to whoever replaced it.
        if token.is_cancelled() {
            return Err(FetchError::Cancelled);
        }
        self.load_slots.borrow_mut().remove(&change);

        match result {
            Ok(entities) => {
                let count = entities.len();
                log::debug!("[Session] loaded {} {:?}", count, change);
                self.shared.commit(&[change], |state| {
                    store(state).replace_all(entities);
                    if let Some(load) = state.load_state_mut(change) {
                        *load = LoadState::Loaded;
                    }
                });
                Ok(count)
            }
            Err(FetchError::Cancelled) => Err(FetchError::Cancelled),
            Err(e) => {
                log::warn!("[Session] loading {:?} failed: {}", change, e);
                let message = e.to_string();
                self.shared.commit(&[change], |state| {
                    if let Some(load) = state.load_state_mut(change) {
                        *load = LoadState::Failed(message);
                    }
                });
                Err(e)
            }
        }
    }
}

/// Commit-point guard: results of a cancelled operation are discarded.
pub(crate) fn ensure_live(token: &CancellationToken) -> FetchResult<()> {
    if token.is_cancelled() {
        Err(FetchError::Cancelled)
    } else {
        Ok(())
    }
}
