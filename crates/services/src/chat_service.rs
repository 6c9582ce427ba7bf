use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use cache::QueryKey;
use noun_core::model::ChatHistory;
use serde_json::json;
use tracing::{debug, warn};

use crate::endpoints::{Endpoint, fallback_body};
use crate::error::{ApiError, ChatError};
use crate::normalize::normalize_chat_history;
use crate::query_client::QueryClient;

/// Result of a send attempt that did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// The prompt was blank; nothing was sent.
    Ignored,
    /// The prompt was accepted; carries the refetched history.
    Sent(ChatHistory),
}

/// AI tutor conversation: cached history plus a single-flight send.
#[derive(Clone)]
pub struct ChatService {
    query: Arc<QueryClient>,
    in_flight: Arc<AtomicBool>,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ChatService {
    #[must_use]
    pub fn new(query: Arc<QueryClient>) -> Self {
        Self {
            query,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn is_sending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Conversation history and prompt quota.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the history endpoint answers with an error status.
    pub async fn history(&self) -> Result<ChatHistory, ApiError> {
        let body = self
            .query
            .fetch_or_fallback(&Endpoint::ChatHistory.query_key())
            .await?;
        Ok(normalize_chat_history(&body))
    }

    /// Send `prompt` to the tutor, then invalidate and refetch the history.
    ///
    /// A blank prompt is ignored without touching the network. Only one send
    /// may be in flight per service; overlapping calls fail fast.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::InFlight` while another send is pending,
    /// `ChatError::LimitReached` when the cached quota is used up, and
    /// `ChatError::Api` when the request itself fails. Once the request is
    /// accepted the send succeeds; if the history cannot be refreshed the last
    /// known history is returned instead.
    pub async fn send_message(&self, prompt: &str) -> Result<SendOutcome, ChatError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Ok(SendOutcome::Ignored);
        }

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("chat send rejected, another send is in flight");
            return Err(ChatError::InFlight);
        };

        let history_key = Endpoint::ChatHistory.query_key();
        if let Some(body) = self.query.cached(&history_key).await? {
            let usage = normalize_chat_history(&body).usage;
            if let (true, Some(limit)) = (usage.is_exhausted(), usage.prompt_limit) {
                return Err(ChatError::LimitReached { limit });
            }
        }

        if let Err(err) = self
            .query
            .post(Endpoint::ChatSend.path(), json!({ "prompt": prompt }))
            .await
        {
            warn!(error = %err, "chat send failed");
            return Err(err.into());
        }

        // Accepted by the server; refresh failures no longer fail the send.
        if let Err(err) = self.query.invalidate(&history_key).await {
            warn!(error = %err, "could not invalidate chat history after send");
        }
        let history = match self.history().await {
            Ok(history) => history,
            Err(err) => {
                warn!(error = %err, "chat history refresh failed after an accepted send");
                self.last_known_history(&history_key).await
            }
        };
        Ok(SendOutcome::Sent(history))
    }

    async fn last_known_history(&self, key: &QueryKey) -> ChatHistory {
        let body = match self.query.cached(key).await {
            Ok(Some(body)) => body,
            _ => fallback_body(key.path()),
        };
        normalize_chat_history(&body)
    }
}
