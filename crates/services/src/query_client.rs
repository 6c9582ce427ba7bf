use std::sync::Arc;

use cache::{QueryCache, QueryKey};
use chrono::Duration;
use serde_json::Value;
use tracing::{debug, warn};

use crate::Clock;
use crate::endpoints::fallback_body;
use crate::error::ApiError;
use crate::response::decode_response;
use crate::transport::{ApiRequest, Transport};

/// Fetches endpoint bodies through the shared query cache.
///
/// The cache is injected; the client is the only writer of entries.
#[derive(Clone)]
pub struct QueryClient {
    cache: Arc<dyn QueryCache>,
    transport: Arc<dyn Transport>,
    clock: Clock,
    stale_after: Duration,
}

impl QueryClient {
    #[must_use]
    pub fn new(
        cache: Arc<dyn QueryCache>,
        transport: Arc<dyn Transport>,
        clock: Clock,
        stale_after: Duration,
    ) -> Self {
        Self {
            cache,
            transport,
            clock,
            stale_after,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Return the cached body for `key` if fresh, otherwise fetch and cache it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport failures, error statuses and bad bodies.
    pub async fn fetch(&self, key: &QueryKey) -> Result<Value, ApiError> {
        let now = self.clock.now();
        if let Some(entry) = self.cache.get(key).await? {
            if entry.is_fresh(now, self.stale_after) {
                debug!(%key, "query cache hit");
                return Ok(entry.value);
            }
        }

        let body = self.send(ApiRequest::get(key.path())).await?;
        self.cache.store(key, body.clone(), now).await?;
        Ok(body)
    }

    /// Like [`QueryClient::fetch`], but a failed round trip degrades instead of erroring.
    ///
    /// On a transport failure the last cached body is served even if stale;
    /// with nothing cached the endpoint's canonical empty body is returned.
    /// Error statuses still propagate so the widget can show its error panel.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for error statuses, bad bodies and cache failures.
    pub async fn fetch_or_fallback(&self, key: &QueryKey) -> Result<Value, ApiError> {
        match self.fetch(key).await {
            Err(ApiError::Transport { detail }) => {
                if let Some(entry) = self.cache.get(key).await? {
                    warn!(%key, %detail, "request failed, serving stale cache entry");
                    return Ok(entry.value);
                }
                warn!(%key, %detail, "request failed, serving fallback body");
                Ok(fallback_body(key.path()))
            }
            other => other,
        }
    }

    /// Peek at the cached body without fetching.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Cache` if the cache cannot be read.
    pub async fn cached(&self, key: &QueryKey) -> Result<Option<Value>, ApiError> {
        Ok(self.cache.get(key).await?.map(|entry| entry.value))
    }

    /// POST `body` to `path`. Mutation responses are never cached.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport failures, error statuses and bad bodies.
    pub async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.send(ApiRequest::post(path, body)).await
    }

    /// Mark `key` stale so its next read refetches.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Cache` if the cache cannot be written.
    pub async fn invalidate(&self, key: &QueryKey) -> Result<bool, ApiError> {
        debug!(%key, "invalidating query");
        Ok(self.cache.invalidate(key).await?)
    }

    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let path = request.path.clone();
        let response = self.transport.send(request).await?;
        let status = response.status;
        let body = decode_response(response).inspect_err(|err| {
            debug!(%path, status, error = %err, "api request rejected");
        })?;
        Ok(body.into_json())
    }
}
