//! Search Coordinator
//!
//! Debounced, cancellable item search. Each change of the query text
//! cancels whatever the previous change started (its debounce wait or its
//! request), so a slow stale response can never overwrite a newer one.
//!
//! State machine: `Idle -> Pending -> {Resolved, Failed}`. A cancelled
//! request ends as `SearchOutcome::Superseded` without touching the state.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::SearchResult;
use crate::error::FetchError;
use crate::gateway::{FetchGateway, Transport};
use crate::merge;
use crate::session::{Change, Shared};

/// Sleep provider for the debounce (browser timers, tokio in tests)
#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchStatus {
    #[default]
    Idle,
    Pending,
    Resolved,
    Failed,
}

/// What the search panel renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Trimmed query of the latest change
    pub query: String,
    pub status: SearchStatus,
    /// Last successful result set; kept across failures
    pub results: Vec<SearchResult>,
    pub error: Option<String>,
}

/// How one query change ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Empty query: went idle without a request
    Cleared,
    /// A newer change (or teardown) cancelled this one
    Superseded,
    /// Published this many results
    Resolved(usize),
    Failed(String),
}

/// One logical search slot
pub struct SearchCoordinator<T> {
    gateway: Rc<FetchGateway<T>>,
    timer: Rc<dyn Timer>,
    shared: Rc<Shared>,
    delay: Duration,
    parent: CancellationToken,
    slot: Rc<RefCell<Option<CancellationToken>>>,
}

impl<T> Clone for SearchCoordinator<T> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            timer: self.timer.clone(),
            shared: self.shared.clone(),
            delay: self.delay,
            parent: self.parent.clone(),
            slot: self.slot.clone(),
        }
    }
}

impl<T: Transport + 'static> SearchCoordinator<T> {
    pub(crate) fn new(
        gateway: Rc<FetchGateway<T>>,
        timer: Rc<dyn Timer>,
        shared: Rc<Shared>,
        delay: Duration,
        parent: CancellationToken,
    ) -> Self {
        Self {
            gateway,
            timer,
            shared,
            delay,
            parent,
            slot: Rc::new(RefCell::new(None)),
        }
    }

    /// Cancel the debounce or request currently owning the slot.
    pub fn cancel(&self) {
        if let Some(token) = self.slot.borrow_mut().take() {
            token.cancel();
        }
    }

    /// Cancel pending work and drop the query, results and error.
    pub fn clear(&self) {
        self.cancel();
        self.shared.commit(&[Change::Search], |state| {
            state.search = SearchState::default();
        });
    }

    fn restart(&self) -> CancellationToken {
        let token = self.parent.child_token();
        if let Some(previous) = self.slot.replace(Some(token.clone())) {
            previous.cancel();
        }
        token
    }

    /// Handle a change of the query text.
    ///
    /// The slot is restarted synchronously, before this returns; the
    /// returned future does the debounce wait and the request and must be
    /// driven (spawned) by the caller.
    pub fn query_changed(&self, text: &str) -> impl Future<Output = SearchOutcome> + 'static {
        let query = text.trim().to_string();
        let token = if query.is_empty() {
            self.clear();
            None
        } else {
            let token = self.restart();
            self.shared.commit(&[Change::Search], |state| {
                state.search.query = query.clone();
                state.search.status = SearchStatus::Pending;
            });
            Some(token)
        };

        let gateway = self.gateway.clone();
        let timer = self.timer.clone();
        let shared = self.shared.clone();
        let delay = self.delay;

        async move {
            let Some(token) = token else {
                return SearchOutcome::Cleared;
            };

            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    log::debug!("[Search] '{}' superseded while debouncing", query);
                    return SearchOutcome::Superseded;
                }
                _ = timer.sleep(delay) => {}
            }

            let result = gateway.search_items(&query, &token).await;

            // Commit point: only a live token may publish.
            if token.is_cancelled() {
                log::debug!("[Search] '{}' superseded in flight", query);
                return SearchOutcome::Superseded;
            }

            match result {
                Ok(items) => {
                    let results: Vec<SearchResult> = merge::search_results(&items);
                    let count = results.len();
                    shared.commit(&[Change::Search], |state| {
                        state.search.status = SearchStatus::Resolved;
                        state.search.results = results;
                        state.search.error = None;
                    });
                    SearchOutcome::Resolved(count)
                }
                Err(FetchError::Cancelled) => SearchOutcome::Superseded,
                Err(e) => {
                    let message = e.to_string();
                    log::warn!("[Search] '{}' failed: {}", query, message);
                    shared.commit(&[Change::Search], |state| {
                        state.search.status = SearchStatus::Failed;
                        state.search.error = Some(message.clone());
                    });
                    SearchOutcome::Failed(message)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::HttpMethod;
    use crate::session::SyncSession;
    use crate::testing::{FakeTransport, TokioTimer};
    use crate::ClientConfig;
    use tokio::time::sleep;

    const GLASS_RESULTS: &str = r##"[
        {"id":"i1","name":"Glass jar","containerId":"c1","container":{"id":"c1","name":"Glass","color":"#0a0","description":"Clear glass"}},
        {"id":"i2","name":"Glass shard","containerId":"gone"}
    ]"##;

    fn session(transport: &FakeTransport) -> SyncSession<FakeTransport> {
        SyncSession::new(transport.clone(), TokioTimer, &ClientConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_input_issues_one_request_for_final_text() {
        let transport = FakeTransport::new();
        transport.respond(HttpMethod::Get, "/api/items/search?name=gla", 200, GLASS_RESULTS);
        let session = session(&transport);

        let (first, second, third) = tokio::join!(
            session.search("g"),
            async {
                sleep(Duration::from_millis(120)).await;
                session.search("gl").await
            },
            async {
                sleep(Duration::from_millis(300)).await;
                session.search("gla").await
            },
        );

        assert_eq!(first, SearchOutcome::Superseded);
        assert_eq!(second, SearchOutcome::Superseded);
        assert_eq!(third, SearchOutcome::Resolved(1));
        let paths: Vec<String> = transport.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/api/items/search?name=gla".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_request_before_debounce_elapses() {
        let transport = FakeTransport::new();
        transport.respond(HttpMethod::Get, "/api/items/search?name=jar", 200, "[]");
        let session = session(&transport);

        let (outcome, _) = tokio::join!(session.search("jar"), async {
            sleep(Duration::from_millis(499)).await;
            assert!(transport.requests().is_empty());
        });
        assert_eq!(outcome, SearchOutcome::Resolved(0));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_never_published() {
        let transport = FakeTransport::new();
        // A is slow, B is fast: B resolves long before A would.
        transport.respond_after(
            HttpMethod::Get,
            "/api/items/search?name=gla",
            Duration::from_millis(1000),
            200,
            r##"[{"id":"a","name":"From A","containerId":"c1","container":{"id":"c1","name":"A","color":"#a00","description":""}}]"##,
        );
        transport.respond_after(
            HttpMethod::Get,
            "/api/items/search?name=glass",
            Duration::from_millis(10),
            200,
            GLASS_RESULTS,
        );
        let session = session(&transport);

        let (a, b) = tokio::join!(session.search("gla"), async {
            // A's request is in flight at this point.
            sleep(Duration::from_millis(600)).await;
            session.search("glass").await
        });

        assert_eq!(a, SearchOutcome::Superseded);
        assert_eq!(b, SearchOutcome::Resolved(1));
        // Let A's transport latency fully elapse; nothing may change.
        sleep(Duration::from_secs(2)).await;

        let state = session.search_state();
        assert_eq!(state.status, SearchStatus::Resolved);
        assert_eq!(state.query, "glass");
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].item_name, "Glass jar");
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_query_clears_without_request() {
        let transport = FakeTransport::new();
        transport.respond(HttpMethod::Get, "/api/items/search?name=glass", 200, GLASS_RESULTS);
        let session = session(&transport);

        assert_eq!(session.search("glass").await, SearchOutcome::Resolved(1));
        assert_eq!(session.search_state().results.len(), 1);

        assert_eq!(session.search("   ").await, SearchOutcome::Cleared);
        let state = session.search_state();
        assert_eq!(state.status, SearchStatus::Idle);
        assert!(state.results.is_empty());
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_cancels_pending_search() {
        let transport = FakeTransport::new();
        transport.respond(HttpMethod::Get, "/api/items/search?name=glass", 200, GLASS_RESULTS);
        let session = session(&transport);

        let (pending, cleared) = tokio::join!(session.search("glass"), async {
            sleep(Duration::from_millis(100)).await;
            session.search("").await
        });
        assert_eq!(pending, SearchOutcome::Superseded);
        assert_eq!(cleared, SearchOutcome::Cleared);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_search_drops_inflight_request() {
        let transport = FakeTransport::new();
        transport.respond_after(
            HttpMethod::Get,
            "/api/items/search?name=glass",
            Duration::from_millis(300),
            200,
            GLASS_RESULTS,
        );
        let session = session(&transport);

        let (outcome, ()) = tokio::join!(session.search("glass"), async {
            // Debounce over, request in flight.
            sleep(Duration::from_millis(600)).await;
            session.clear_search();
        });
        sleep(Duration::from_millis(1000)).await;

        assert_eq!(outcome, SearchOutcome::Superseded);
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(session.search_state(), SearchState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_last_results() {
        let transport = FakeTransport::new();
        transport.respond(HttpMethod::Get, "/api/items/search?name=glass", 200, GLASS_RESULTS);
        transport.respond(HttpMethod::Get, "/api/items/search?name=paper", 500, "search index offline");
        let session = session(&transport);

        assert_eq!(session.search("glass").await, SearchOutcome::Resolved(1));
        let outcome = session.search("paper").await;
        assert_eq!(
            outcome,
            SearchOutcome::Failed("Request failed: 500 - search index offline".to_string())
        );

        let state = session.search_state();
        assert_eq!(state.status, SearchStatus::Failed);
        assert_eq!(state.error.as_deref(), Some("Request failed: 500 - search index offline"));
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].item_name, "Glass jar");
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_while_debouncing() {
        let transport = FakeTransport::new();
        transport.respond(HttpMethod::Get, "/api/items/search?name=jar", 200, "[]");
        let session = session(&transport);

        let search = session.search(" jar ");
        let state = session.search_state();
        assert_eq!(state.status, SearchStatus::Pending);
        assert_eq!(state.query, "jar");

        assert_eq!(search.await, SearchOutcome::Resolved(0));
        assert_eq!(session.search_state().status, SearchStatus::Resolved);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_search() {
        let transport = FakeTransport::new();
        transport.respond(HttpMethod::Get, "/api/items/search?name=jar", 200, "[]");
        let session = session(&transport);

        let (outcome, _) = tokio::join!(session.search("jar"), async {
            sleep(Duration::from_millis(50)).await;
            session.teardown();
        });
        assert_eq!(outcome, SearchOutcome::Superseded);
        assert!(transport.requests().is_empty());
    }
}
