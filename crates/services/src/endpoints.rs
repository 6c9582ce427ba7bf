use cache::QueryKey;
use serde_json::{Value, json};

/// Every endpoint the dashboard talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ForumPosts,
    Jobs,
    Exams,
    Courses,
    Progress,
    ChatHistory,
    ChatSend,
}

impl Endpoint {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::ForumPosts => "/api/forum/posts",
            Self::Jobs => "/api/jobs",
            Self::Exams => "/api/exams",
            Self::Courses => "/api/courses",
            Self::Progress => "/api/progress",
            Self::ChatHistory => "/api/chat/history",
            Self::ChatSend => "/api/chat",
        }
    }

    #[must_use]
    pub fn query_key(self) -> QueryKey {
        QueryKey::new(self.path())
    }
}

/// Canonical empty-but-valid body for `path`, used when the request itself fails.
///
/// Matching is by substring so query strings and sub-paths resolve to the
/// same shape. Unknown paths get an empty object.
#[must_use]
pub fn fallback_body(path: &str) -> Value {
    // Chat history must be checked before any broader prefix.
    if path.contains("/api/chat/history") {
        json!({ "messages": [], "promptsUsed": 0, "promptLimit": null })
    } else if path.contains("/api/courses") {
        json!({ "courses": [] })
    } else if path.contains("/api/exams") {
        json!({ "exams": [] })
    } else if path.contains("/api/jobs") {
        json!({ "jobs": [] })
    } else if path.contains("/api/forum") {
        json!({ "posts": [] })
    } else if path.contains("/api/progress") {
        json!({ "progress": [] })
    } else {
        json!({})
    }
}
