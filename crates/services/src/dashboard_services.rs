use std::sync::Arc;

use cache::{InMemoryQueryCache, QueryCache};

use crate::Clock;
use crate::chat_service::ChatService;
use crate::config::ApiConfig;
use crate::error::TransportError;
use crate::exam_service::ExamService;
use crate::forum_service::ForumService;
use crate::job_service::JobService;
use crate::progress_service::ProgressService;
use crate::query_client::QueryClient;
use crate::transport::{ReqwestTransport, Transport};

/// Assembles the dashboard widget services over one shared query client.
#[derive(Clone)]
pub struct DashboardServices {
    query: Arc<QueryClient>,
    forum: Arc<ForumService>,
    jobs: Arc<JobService>,
    exams: Arc<ExamService>,
    progress: Arc<ProgressService>,
    chat: Arc<ChatService>,
}

impl DashboardServices {
    #[must_use]
    pub fn new(
        cache: Arc<dyn QueryCache>,
        transport: Arc<dyn Transport>,
        clock: Clock,
        stale_after: chrono::Duration,
    ) -> Self {
        let query = Arc::new(QueryClient::new(cache, transport, clock, stale_after));
        Self {
            forum: Arc::new(ForumService::new(Arc::clone(&query))),
            jobs: Arc::new(JobService::new(Arc::clone(&query))),
            exams: Arc::new(ExamService::new(Arc::clone(&query))),
            progress: Arc::new(ProgressService::new(Arc::clone(&query))),
            chat: Arc::new(ChatService::new(Arc::clone(&query))),
            query,
        }
    }

    /// Build services talking to the configured API over HTTP.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the HTTP client cannot be built.
    pub fn from_config(config: &ApiConfig, clock: Clock) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(config, Arc::new(transport), clock))
    }

    /// Build services over `transport` with a fresh in-memory cache.
    #[must_use]
    pub fn with_transport(config: &ApiConfig, transport: Arc<dyn Transport>, clock: Clock) -> Self {
        Self::new(
            Arc::new(InMemoryQueryCache::new()),
            transport,
            clock,
            config.stale_window(),
        )
    }

    #[must_use]
    pub fn query(&self) -> Arc<QueryClient> {
        Arc::clone(&self.query)
    }

    #[must_use]
    pub fn forum(&self) -> Arc<ForumService> {
        Arc::clone(&self.forum)
    }

    #[must_use]
    pub fn jobs(&self) -> Arc<JobService> {
        Arc::clone(&self.jobs)
    }

    #[must_use]
    pub fn exams(&self) -> Arc<ExamService> {
        Arc::clone(&self.exams)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn chat(&self) -> Arc<ChatService> {
        Arc::clone(&self.chat)
    }
}
