//! Collection lifecycle management.

use std::sync::Arc;

use crate::error::VectorStoreError;
use crate::models::CollectionHandle;
use crate::services::VectorStore;

/// Create-or-get and delete operations on named collections.
///
/// Existence is re-checked against the remote store on every call; nothing
/// is cached locally, so concurrent processes never act on stale state.
#[derive(Clone)]
pub struct CollectionManager {
    store: Arc<dyn VectorStore>,
}

impl CollectionManager {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self { store }
    }

    /// Return a handle to the named collection, creating it if absent.
    ///
    /// Idempotent: never fails because the collection already exists, even
    /// when a concurrent caller creates it between the check and the create.
    pub async fn get_or_create(&self, name: &str) -> Result<CollectionHandle, VectorStoreError> {
        if self.store.collection_info(name).await?.is_none() {
            self.store.create_collection(name).await?;
        }
        Ok(CollectionHandle::new(name))
    }

    /// Remove the named collection and all its records.
    ///
    /// Fails with [`VectorStoreError::NotFound`] if no such collection exists.
    pub async fn delete(&self, name: &str) -> Result<(), VectorStoreError> {
        if self.store.collection_info(name).await?.is_none() {
            return Err(VectorStoreError::NotFound(name.to_string()));
        }
        self.store.delete_collection(name).await
    }
}
