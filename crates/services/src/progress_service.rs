use std::cmp::Reverse;
use std::sync::Arc;

use noun_core::model::UserProgress;

use crate::endpoints::Endpoint;
use crate::error::ApiError;
use crate::normalize::normalize_progress;
use crate::query_client::QueryClient;

/// Number of rows shown in the recent activity list.
pub const RECENT_PROGRESS_LIMIT: usize = 5;

/// Recent activity plus aggregate figures over all rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressOverview {
    pub recent: Vec<UserProgress>,
    pub average_score: Option<u8>,
    pub total: usize,
}

#[must_use]
pub fn summarize_progress(mut rows: Vec<UserProgress>, limit: usize) -> ProgressOverview {
    let total = rows.len();
    let average_score = if rows.is_empty() {
        None
    } else {
        let sum: u64 = rows.iter().map(|row| u64::from(row.score())).sum();
        let count = u64::try_from(total).unwrap_or(u64::MAX);
        // Mean of 0..=100 scores always fits.
        u8::try_from((sum + count / 2) / count).ok()
    };

    rows.sort_by_key(|row| Reverse(row.timestamp));
    rows.truncate(limit);

    ProgressOverview {
        recent: rows,
        average_score,
        total,
    }
}

#[derive(Clone)]
pub struct ProgressService {
    query: Arc<QueryClient>,
}

impl ProgressService {
    #[must_use]
    pub fn new(query: Arc<QueryClient>) -> Self {
        Self { query }
    }

    /// # Errors
    ///
    /// Returns `ApiError` when the progress endpoint answers with an error status.
    pub async fn overview(&self) -> Result<ProgressOverview, ApiError> {
        let body = self
            .query
            .fetch_or_fallback(&Endpoint::Progress.query_key())
            .await?;
        Ok(summarize_progress(
            normalize_progress(&body),
            RECENT_PROGRESS_LIMIT,
        ))
    }
}
