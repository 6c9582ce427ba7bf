use std::cmp::Reverse;
use std::sync::Arc;

use noun_core::model::Job;

use crate::endpoints::Endpoint;
use crate::error::ApiError;
use crate::normalize::normalize_jobs;
use crate::query_client::QueryClient;

/// Number of postings shown on the dashboard job board.
pub const JOB_BOARD_LIMIT: usize = 3;

#[must_use]
pub fn latest_jobs(mut jobs: Vec<Job>, limit: usize) -> Vec<Job> {
    jobs.sort_by_key(|job| Reverse(job.posted_at));
    jobs.truncate(limit);
    jobs
}

#[derive(Clone)]
pub struct JobService {
    query: Arc<QueryClient>,
}

impl JobService {
    #[must_use]
    pub fn new(query: Arc<QueryClient>) -> Self {
        Self { query }
    }

    /// Most recent postings, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the jobs endpoint answers with an error status.
    pub async fn latest(&self) -> Result<Vec<Job>, ApiError> {
        let body = self
            .query
            .fetch_or_fallback(&Endpoint::Jobs.query_key())
            .await?;
        Ok(latest_jobs(normalize_jobs(&body), JOB_BOARD_LIMIT))
    }
}
