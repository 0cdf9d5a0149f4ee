use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::keys::CollectionKey;
use crate::store::{LocalStore, StoreError};

/// Process-local store. The default backend for tests and for sessions that
/// have not attached a persistent cache yet.
#[derive(Default)]
pub struct InMemoryStore {
    cells: RwLock<HashMap<String, Value>>,
}

#[async_trait::async_trait]
impl LocalStore for InMemoryStore {
    async fn get(&self, key: &CollectionKey) -> Result<Option<Value>, StoreError> {
        let cells = self.cells.read().await;
        Ok(cells.get(key.as_str()).cloned())
    }

    async fn replace(&self, key: &CollectionKey, next: Value) -> Result<(), StoreError> {
        let mut cells = self.cells.write().await;
        cells.insert(key.as_str().to_string(), next);
        Ok(())
    }
}
