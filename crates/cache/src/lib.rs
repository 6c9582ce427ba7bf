#![forbid(unsafe_code)]

pub mod memory;
pub mod query_cache;

pub use memory::InMemoryQueryCache;
pub use query_cache::{CacheEntry, CacheError, QueryCache, QueryKey, ValueUpdate};
