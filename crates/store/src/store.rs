use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::keys::CollectionKey;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The local-first cache surface the workflow engine writes through.
///
/// `replace` takes the full next collection, not a delta, and must have
/// persisted it by the time it returns. Reconciling the cache with a remote
/// backend in the background is the implementor's concern; callers treat
/// the store as a synchronous-looking read/write surface once a call
/// resolves.
#[async_trait]
pub trait LocalStore: Send + Sync {
    async fn get(&self, key: &CollectionKey) -> Result<Option<Value>, StoreError>;
    async fn replace(&self, key: &CollectionKey, next: Value) -> Result<(), StoreError>;
}
