use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::query_cache::{CacheEntry, CacheError, QueryCache, QueryKey, ValueUpdate};

/// Process-local cache shared by every widget of one app instance.
#[derive(Clone, Default)]
pub struct InMemoryQueryCache {
    entries: Arc<Mutex<HashMap<QueryKey, CacheEntry>>>,
}

impl InMemoryQueryCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl QueryCache for InMemoryQueryCache {
    async fn get(&self, key: &QueryKey) -> Result<Option<CacheEntry>, CacheError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn store(
        &self,
        key: &QueryKey,
        value: Value,
        fetched_at: DateTime<Utc>,
    ) -> Result<(), CacheError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        guard.insert(key.clone(), CacheEntry::new(value, fetched_at));
        Ok(())
    }

    async fn invalidate(&self, key: &QueryKey) -> Result<bool, CacheError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        Ok(guard.get_mut(key).map(|entry| entry.stale = true).is_some())
    }

    async fn mutate(&self, key: &QueryKey, update: ValueUpdate) -> Result<bool, CacheError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        match guard.get_mut(key) {
            Some(entry) => {
                update(&mut entry.value);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn clear(&self) -> Result<(), CacheError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        guard.clear();
        Ok(())
    }
}
