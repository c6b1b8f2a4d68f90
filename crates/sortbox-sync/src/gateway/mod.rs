//! Fetch Gateway
//!
//! One typed wrapper around the HTTP transport. The gateway owns the status
//! policy (non-2xx becomes `FetchError::Http`, 204 is "no body") and the
//! cancellation race; transports only move bytes.

mod endpoints;
mod reqwest_transport;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::error::{FetchError, FetchResult, TransportError};

pub use reqwest_transport::ReqwestTransport;

/// HTTP verbs used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Request handed to a transport. `path` is API-relative (`/api/...`).
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

/// Raw response: status, reason phrase and the body as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Byte mover behind the gateway
///
/// Futures are `!Send`: the browser fetch API lives on the main thread.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Error payload some endpoints send with a non-2xx status
#[derive(Deserialize)]
struct ServerMessage {
    message: Option<String>,
}

/// Build the display message for a failed response.
///
/// Server `{"message": ...}` first, then the raw body, then the status line.
pub fn error_message(response: &HttpResponse) -> String {
    let body = response.body.trim();
    if let Ok(ServerMessage { message: Some(message) }) = serde_json::from_str::<ServerMessage>(body) {
        if !message.trim().is_empty() {
            return message;
        }
    }
    if !body.is_empty() {
        return body.to_string();
    }
    if response.status_text.is_empty() {
        response.status.to_string()
    } else {
        format!("{} {}", response.status, response.status_text)
    }
}

/// Typed HTTP gateway
pub struct FetchGateway<T> {
    transport: T,
}

impl<T: Transport> FetchGateway<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one request and apply the status policy, leaving the body raw.
    ///
    /// A token cancelled before the call or while it is in flight yields
    /// `FetchError::Cancelled`; the transport future is dropped on the spot.
    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
        token: &CancellationToken,
    ) -> FetchResult<HttpResponse> {
        if token.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        let request = HttpRequest {
            method,
            path: path.to_string(),
            body,
        };

        log::debug!("[Gateway] {} {}", method.as_str(), path);

        let response = tokio::select! {
            biased;
            _ = token.cancelled() => {
                log::debug!("[Gateway] {} {} cancelled", method.as_str(), path);
                return Err(FetchError::Cancelled);
            }
            result = self.transport.send(request) => result,
        };

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                log::warn!("[Gateway] {} {} transport error: {}", method.as_str(), path, e);
                return Err(e.into());
            }
        };

        if !response.is_success() {
            let message = error_message(&response);
            log::warn!("[Gateway] {} {} -> {}: {}", method.as_str(), path, response.status, message);
            return Err(FetchError::Http {
                status: response.status,
                message,
            });
        }

        Ok(response)
    }

    /// Issue one request and decode its JSON body.
    ///
    /// Returns `Ok(None)` for 204 (or an empty 2xx body), `Ok(Some(body))`
    /// otherwise.
    pub async fn request<B, R>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        token: &CancellationToken,
    ) -> FetchResult<Option<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = match body {
            Some(body) => Some(serde_json::to_value(body).map_err(|e| FetchError::Decode(e.to_string()))?),
            None => None,
        };

        let response = self.execute(method, path, body, token).await?;
        if response.status == 204 || response.body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&response.body)
            .map(Some)
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Like `request`, but an empty 2xx is a contract violation.
    pub async fn request_json<B, R>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        token: &CancellationToken,
    ) -> FetchResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(method, path, body, token)
            .await?
            .ok_or_else(|| FetchError::MissingBody(path.to_string()))
    }

    /// Request whose success carries no body (DELETE)
    pub async fn request_empty(&self, method: HttpMethod, path: &str, token: &CancellationToken) -> FetchResult<()> {
        self.execute(method, path, None, token).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;
    use std::time::Duration;

    fn response(status: u16, status_text: &str, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            status_text: status_text.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_error_message_prefers_server_message() {
        let r = response(400, "Bad Request", r#"{"message":"Name too long"}"#);
        assert_eq!(error_message(&r), "Name too long");
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        let r = response(500, "Internal Server Error", "boom");
        assert_eq!(error_message(&r), "boom");

        let r = response(500, "Internal Server Error", r#"{"error":"x"}"#);
        assert_eq!(error_message(&r), r#"{"error":"x"}"#);
    }

    #[test]
    fn test_error_message_falls_back_to_status_line() {
        let r = response(503, "Service Unavailable", "  ");
        assert_eq!(error_message(&r), "503 Service Unavailable");

        let r = response(599, "", "");
        assert_eq!(error_message(&r), "599");
    }

    #[tokio::test]
    async fn test_no_content_returns_none() {
        let transport = FakeTransport::new();
        transport.respond(HttpMethod::Delete, "/api/advert/3", 204, "");
        let gateway = FetchGateway::new(transport);

        let result: Option<serde_json::Value> = gateway
            .request::<(), _>(HttpMethod::Delete, "/api/advert/3", None, &CancellationToken::new())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_http_error_is_typed() {
        let transport = FakeTransport::new();
        transport.respond(HttpMethod::Get, "/api/containers", 500, r#"{"message":"db offline"}"#);
        let gateway = FetchGateway::new(transport);

        let err = gateway.list_containers(&CancellationToken::new()).await.unwrap_err();
        assert_eq!(err, FetchError::Http { status: 500, message: "db offline".into() });
    }

    #[tokio::test]
    async fn test_transport_error() {
        let transport = FakeTransport::new();
        transport.fail(HttpMethod::Get, "/api/items", "connection refused");
        let gateway = FetchGateway::new(transport);

        let err = gateway.list_items(&CancellationToken::new()).await.unwrap_err();
        assert_eq!(err, FetchError::Transport("connection refused".into()));
    }

    #[tokio::test]
    async fn test_precancelled_token_skips_transport() {
        let transport = FakeTransport::new();
        transport.respond(HttpMethod::Get, "/api/items", 200, "[]");
        let gateway = FetchGateway::new(transport);
        let token = CancellationToken::new();
        token.cancel();

        let err = gateway.list_items(&token).await.unwrap_err();
        assert!(err.is_cancelled());
        assert!(gateway.transport().requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_mid_flight() {
        let transport = FakeTransport::new();
        transport.respond_after(HttpMethod::Get, "/api/advert", Duration::from_secs(5), 200, "[]");
        let gateway = FetchGateway::new(transport);
        let token = CancellationToken::new();

        let canceller = token.clone();
        let (result, _) = tokio::join!(gateway.list_adverts(&token), async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            canceller.cancel();
        });
        assert_eq!(result.unwrap_err(), FetchError::Cancelled);
    }

    #[tokio::test]
    async fn test_empty_success_where_body_expected() {
        let transport = FakeTransport::new();
        transport.respond(HttpMethod::Post, "/api/advert", 204, "");
        let gateway = FetchGateway::new(transport);

        let fields = crate::domain::AdvertFields::default();
        let err = gateway.create_advert(&fields, &CancellationToken::new()).await.unwrap_err();
        assert_eq!(err, FetchError::MissingBody("/api/advert".into()));
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let transport = FakeTransport::new();
        transport.respond(HttpMethod::Get, "/api/items/i1", 200, "<html>");
        let gateway = FetchGateway::new(transport);

        let err = gateway.get_item("i1", &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
