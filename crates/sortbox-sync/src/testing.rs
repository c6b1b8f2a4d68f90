//! Test doubles: a scripted transport and a tokio-backed timer.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::gateway::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::search::Timer;

#[derive(Clone)]
struct Scripted {
    delay: Duration,
    result: Result<HttpResponse, TransportError>,
}

#[derive(Default)]
struct Inner {
    routes: RefCell<HashMap<(HttpMethod, String), VecDeque<Scripted>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

/// In-memory transport answering from per-route scripts.
///
/// Scripts for a route are consumed in order; the last one keeps answering.
/// Unscripted routes get a 404. Clones share the same scripts and log.
#[derive(Clone, Default)]
pub struct FakeTransport {
    inner: Rc<Inner>,
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "",
    }
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
        self.respond_after(method, path, Duration::ZERO, status, body);
    }

    pub fn respond_after(&self, method: HttpMethod, path: &str, delay: Duration, status: u16, body: &str) {
        let response = HttpResponse {
            status,
            status_text: reason(status).to_string(),
            body: body.to_string(),
        };
        self.script(method, path, Scripted { delay, result: Ok(response) });
    }

    pub fn fail(&self, method: HttpMethod, path: &str, message: &str) {
        let result = Err(TransportError(message.to_string()));
        self.script(method, path, Scripted { delay: Duration::ZERO, result });
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.requests.borrow().clone()
    }

    fn script(&self, method: HttpMethod, path: &str, scripted: Scripted) {
        self.inner
            .routes
            .borrow_mut()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
    }

    fn next(&self, method: HttpMethod, path: &str) -> Option<Scripted> {
        let mut routes = self.inner.routes.borrow_mut();
        let queue = routes.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.inner.requests.borrow_mut().push(request.clone());

        let Some(scripted) = self.next(request.method, &request.path) else {
            return Ok(HttpResponse {
                status: 404,
                status_text: reason(404).to_string(),
                body: String::new(),
            });
        };

        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.result
    }
}

/// Debounce timer on tokio time (pausable in tests)
pub struct TokioTimer;

#[async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
