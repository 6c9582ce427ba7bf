use chrono::{DateTime, Utc};

use crate::model::PostId;

/// Display name used when a post arrives without an author.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Author of a forum post, resolved once at the normalization boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    first_name: String,
}

impl Author {
    /// Builds an author, falling back to [`UNKNOWN_AUTHOR`] for a missing or blank name.
    #[must_use]
    pub fn new(first_name: Option<&str>) -> Self {
        let first_name = first_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_AUTHOR);
        Self {
            first_name: first_name.to_string(),
        }
    }

    #[must_use]
    pub fn unknown() -> Self {
        Self::new(None)
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.first_name == UNKNOWN_AUTHOR
    }
}

/// A discussion thread as listed by the forum endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumPost {
    pub id: PostId,
    pub title: String,
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub views: u64,
    pub reply_count: u64,
}

impl ForumPost {
    /// Views plus replies; used as the tie-breaker when ranking highlights.
    #[must_use]
    pub fn engagement(&self) -> u64 {
        self.views.saturating_add(self.reply_count)
    }
}
