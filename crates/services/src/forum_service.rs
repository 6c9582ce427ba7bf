use std::cmp::Reverse;
use std::sync::Arc;

use noun_core::model::ForumPost;

use crate::endpoints::Endpoint;
use crate::error::ApiError;
use crate::normalize::normalize_posts;
use crate::query_client::QueryClient;

/// Number of posts shown in the forum highlights card.
pub const FORUM_HIGHLIGHT_LIMIT: usize = 2;

/// Newest posts first; equal timestamps rank the more engaged post first.
#[must_use]
pub fn select_highlights(mut posts: Vec<ForumPost>, limit: usize) -> Vec<ForumPost> {
    posts.sort_by_key(|post| (Reverse(post.created_at), Reverse(post.engagement())));
    posts.truncate(limit);
    posts
}

#[derive(Clone)]
pub struct ForumService {
    query: Arc<QueryClient>,
}

impl ForumService {
    #[must_use]
    pub fn new(query: Arc<QueryClient>) -> Self {
        Self { query }
    }

    /// Posts for the dashboard highlights card.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the forum endpoint answers with an error status.
    pub async fn highlights(&self) -> Result<Vec<ForumPost>, ApiError> {
        let body = self
            .query
            .fetch_or_fallback(&Endpoint::ForumPosts.query_key())
            .await?;
        Ok(select_highlights(normalize_posts(&body), FORUM_HIGHLIGHT_LIMIT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::{StubTransport, stub_client};
    use chrono::{DateTime, Duration, Utc};
    use noun_core::model::{Author, PostId};
    use noun_core::time::{fixed_clock, fixed_now};
    use serde_json::json;

    fn post(id: &str, created_at: DateTime<Utc>, views: u64, replies: u64) -> ForumPost {
        ForumPost {
            id: PostId::new(id),
            title: format!("Post {id}"),
            author: Author::unknown(),
            created_at,
            views,
            reply_count: replies,
        }
    }

    fn ids(posts: &[ForumPost]) -> Vec<&str> {
        posts.iter().map(|post| post.id.as_str()).collect()
    }

    #[test]
    fn newer_post_wins_regardless_of_engagement() {
        let now = fixed_now();
        let posts = vec![
            post("old-popular", now - Duration::days(1), 900, 90),
            post("new-quiet", now, 0, 0),
        ];
        assert_eq!(ids(&select_highlights(posts, 2)), ["new-quiet", "old-popular"]);
    }

    #[test]
    fn equal_timestamps_rank_by_views_plus_replies() {
        let now = fixed_now();
        let posts = vec![
            post("a", now, 10, 0),
            post("b", now, 4, 8),
            post("c", now - Duration::hours(1), 100, 100),
        ];
        assert_eq!(ids(&select_highlights(posts, 2)), ["b", "a"]);
    }

    #[tokio::test]
    async fn highlights_fetches_and_takes_two() {
        let stub = StubTransport::new();
        stub.get_json(
            Endpoint::ForumPosts.path(),
            &json!({"posts": [
                {"id": "1", "title": "A", "createdAt": "2024-01-01T00:00:00Z"},
                {"id": "2", "title": "B", "createdAt": "2024-01-03T00:00:00Z"},
                {"id": "3", "title": "C", "createdAt": "2024-01-02T00:00:00Z"},
            ]}),
        );
        let service = ForumService::new(stub_client(&stub, fixed_clock()));
        let posts = service.highlights().await.unwrap();
        assert_eq!(ids(&posts), ["2", "3"]);
    }
}
