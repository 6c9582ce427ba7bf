use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Errors surfaced by cache backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CacheError {
    #[error("cache store is unavailable: {0}")]
    Unavailable(String),
}

/// Cache key for one endpoint's response body.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(String);

impl QueryKey {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The endpoint path this key was built from.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QueryKey({})", self.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A cached response body along with its bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub value: Value,
    pub fetched_at: DateTime<Utc>,
    /// Set by invalidation; a stale entry is still readable but must be refetched.
    pub stale: bool,
}

impl CacheEntry {
    #[must_use]
    pub fn new(value: Value, fetched_at: DateTime<Utc>) -> Self {
        Self {
            value,
            fetched_at,
            stale: false,
        }
    }

    /// True when the entry was not invalidated and is younger than `stale_after`.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, stale_after: Duration) -> bool {
        !self.stale && now - self.fetched_at < stale_after
    }
}

/// In-place update applied to a cached body.
pub type ValueUpdate = Box<dyn FnOnce(&mut Value) + Send>;

/// Keyed store of fetched response bodies.
///
/// Dashboard code only reads and invalidates; `store` is reserved for the
/// query client that performs the fetch.
#[async_trait]
pub trait QueryCache: Send + Sync {
    /// Read the entry for `key`, fresh or stale.
    ///
    /// # Errors
    ///
    /// Returns `CacheError` if the backend cannot be read.
    async fn get(&self, key: &QueryKey) -> Result<Option<CacheEntry>, CacheError>;

    /// Replace the entry for `key` with a freshly fetched body.
    ///
    /// # Errors
    ///
    /// Returns `CacheError` if the backend cannot be written.
    async fn store(
        &self,
        key: &QueryKey,
        value: Value,
        fetched_at: DateTime<Utc>,
    ) -> Result<(), CacheError>;

    /// Mark the entry stale so the next read refetches it.
    ///
    /// Returns whether an entry existed.
    ///
    /// # Errors
    ///
    /// Returns `CacheError` if the backend cannot be written.
    async fn invalidate(&self, key: &QueryKey) -> Result<bool, CacheError>;

    /// Apply `update` to the cached body for `key`, if present.
    ///
    /// Returns whether an entry existed.
    ///
    /// # Errors
    ///
    /// Returns `CacheError` if the backend cannot be written.
    async fn mutate(&self, key: &QueryKey, update: ValueUpdate) -> Result<bool, CacheError>;

    /// Drop every entry.
    ///
    /// # Errors
    ///
    /// Returns `CacheError` if the backend cannot be written.
    async fn clear(&self) -> Result<(), CacheError>;
}
