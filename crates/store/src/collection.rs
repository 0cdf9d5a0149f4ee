use std::future::Future;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::keys::CollectionKey;
use crate::store::{LocalStore, StoreError};

/// Typed view over one cached collection. Reads tolerate a corrupt cache
/// cell by discarding it and treating the collection as empty; writes always
/// replace the full collection.
pub struct Collection<T> {
    key: CollectionKey,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(key: CollectionKey) -> Self {
        Self { key, _marker: PhantomData }
    }

    pub fn key(&self) -> &CollectionKey {
        &self.key
    }

    pub async fn read<S>(&self, store: &S) -> Result<Vec<T>, StoreError>
    where
        S: LocalStore + ?Sized,
    {
        match store.get(&self.key).await? {
            None => Ok(Vec::new()),
            Some(value) => match serde_json::from_value(value) {
                Ok(items) => Ok(items),
                Err(error) => {
                    warn!(key = %self.key, %error, "discarding corrupt cached collection");
                    Ok(Vec::new())
                }
            },
        }
    }

    pub async fn write<S>(&self, store: &S, items: &[T]) -> Result<(), StoreError>
    where
        S: LocalStore + ?Sized,
    {
        let value = serde_json::to_value(items)?;
        store.replace(&self.key, value).await
    }

    /// Read-through load: cached data is returned as-is; a missing or
    /// corrupt cell falls back to `fetch` and seeds the cache with its
    /// result.
    pub async fn load_or_else<S, F, Fut>(&self, store: &S, fetch: F) -> Result<Vec<T>, StoreError>
    where
        S: LocalStore + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, StoreError>>,
    {
        if let Some(value) = store.get(&self.key).await? {
            match serde_json::from_value(value) {
                Ok(items) => return Ok(items),
                Err(error) => {
                    warn!(key = %self.key, %error, "corrupt cached collection, refetching");
                }
            }
        }

        let fetched = fetch().await?;
        self.write(store, &fetched).await?;
        Ok(fetched)
    }
}

#[cfg(test)]
mod tests {
    use coverline_core::tenant::AgencyId;
    use serde_json::json;
    use uuid::Uuid;

    use crate::keys::CollectionKey;
    use crate::memory::InMemoryStore;
    use crate::store::LocalStore;

    use super::Collection;

    fn key() -> CollectionKey {
        CollectionKey::opportunities(&AgencyId(Uuid::new_v4()))
    }

    #[tokio::test]
    async fn missing_cell_reads_as_empty() {
        let store = InMemoryStore::default();
        let collection: Collection<String> = Collection::new(key());

        let items = collection.read(&store).await.expect("read");
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let store = InMemoryStore::default();
        let collection: Collection<String> = Collection::new(key());

        collection
            .write(&store, &["a".to_string(), "b".to_string()])
            .await
            .expect("write");
        let items = collection.read(&store).await.expect("read");
        assert_eq!(items, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn corrupt_cell_reads_as_empty_instead_of_failing() {
        let store = InMemoryStore::default();
        let key = key();
        store
            .replace(&key, json!({"not": "a list"}))
            .await
            .expect("seed corrupt value");

        let collection: Collection<String> = Collection::new(key);
        let items = collection.read(&store).await.expect("read");
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn load_or_else_fetches_once_and_seeds_the_cache() {
        let store = InMemoryStore::default();
        let collection: Collection<String> = Collection::new(key());

        let items = collection
            .load_or_else(&store, || async { Ok(vec!["fetched".to_string()]) })
            .await
            .expect("load");
        assert_eq!(items, vec!["fetched".to_string()]);

        // Second load hits the cache; the fetch closure must not run.
        let items = collection
            .load_or_else(&store, || async {
                panic!("cache should have been seeded");
            })
            .await
            .expect("load from cache");
        assert_eq!(items, vec!["fetched".to_string()]);
    }
}
