use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::transport::{ApiRequest, HttpMethod, HttpResponse, Transport};

#[derive(Clone, Debug)]
enum StubReply {
    Respond(HttpResponse),
    Fail(String),
}

/// In-memory transport with canned replies, for tests and offline runs.
///
/// Unrouted requests answer 404, or fail outright when built with
/// [`StubTransport::offline`]. Requests are recorded for inspection, except
/// in offline mode where the stub backs a long-running app.
#[derive(Clone, Default)]
pub struct StubTransport {
    routes: Arc<Mutex<HashMap<(HttpMethod, String), StubReply>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
    offline: bool,
}

impl StubTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport where every unrouted request is a network failure.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    /// Answer `method path` with `response` from now on.
    pub fn respond(&self, method: HttpMethod, path: &str, response: HttpResponse) -> &Self {
        self.route(method, path, StubReply::Respond(response))
    }

    /// Answer `GET path` with a 200 JSON body.
    pub fn get_json(&self, path: &str, body: &Value) -> &Self {
        self.respond(
            HttpMethod::Get,
            path,
            HttpResponse::json(200, body.to_string()),
        )
    }

    /// Make `method path` fail below the HTTP layer.
    pub fn fail(&self, method: HttpMethod, path: &str, detail: &str) -> &Self {
        self.route(method, path, StubReply::Fail(detail.to_string()))
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn request_count(&self, method: HttpMethod, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.method == method && request.path == path)
            .count()
    }

    fn route(&self, method: HttpMethod, path: &str, reply: StubReply) -> &Self {
        if let Ok(mut routes) = self.routes.lock() {
            routes.insert((method, path.to_string()), reply);
        }
        self
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: ApiRequest) -> Result<HttpResponse, TransportError> {
        let reply = {
            let routes = self
                .routes
                .lock()
                .map_err(|e| TransportError::Request(e.to_string()))?;
            routes.get(&(request.method, request.path.clone())).cloned()
        };
        if !self.offline {
            self.requests
                .lock()
                .map_err(|e| TransportError::Request(e.to_string()))?
                .push(request);
        }

        match reply {
            Some(StubReply::Respond(response)) => Ok(response),
            Some(StubReply::Fail(detail)) => Err(TransportError::Request(detail)),
            None if self.offline => Err(TransportError::Request("offline".to_string())),
            None => Ok(HttpResponse::json(404, "")),
        }
    }
}

#[cfg(test)]
pub(crate) fn stub_client(stub: &StubTransport, clock: crate::Clock) -> Arc<crate::QueryClient> {
    Arc::new(crate::QueryClient::new(
        Arc::new(cache::InMemoryQueryCache::new()),
        Arc::new(stub.clone()),
        clock,
        chrono::Duration::seconds(30),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unrouted_requests_answer_not_found_and_are_recorded() {
        let stub = StubTransport::new();
        let response = stub.send(ApiRequest::get("/api/nowhere")).await.unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(stub.request_count(HttpMethod::Get, "/api/nowhere"), 1);
    }

    #[tokio::test]
    async fn offline_stub_fails_unrouted_requests() {
        let stub = StubTransport::offline();
        stub.get_json("/api/jobs", &serde_json::json!({"jobs": []}));

        assert!(stub.send(ApiRequest::get("/api/jobs")).await.is_ok());
        let err = stub.send(ApiRequest::get("/api/forum")).await.unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
    }

    #[tokio::test]
    async fn offline_stub_keeps_no_request_log() {
        let stub = StubTransport::offline();
        for _ in 0..3 {
            let _ = stub.send(ApiRequest::get("/api/forum")).await;
        }
        assert!(stub.requests().is_empty());
    }
}
