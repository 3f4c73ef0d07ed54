use crate::config::{StorageBackend, StorageConfig};
use crate::error::Result;
use crate::state::{InMemoryStore, JsonFileStore, SubmissionStore};
use std::sync::Arc;

/// Create a submission store based on configuration
pub async fn create_store(config: &StorageConfig) -> Result<Arc<dyn SubmissionStore>> {
    match config.backend {
        StorageBackend::JsonFile => {
            tracing::info!(path = ?config.submissions_path, "Initializing JSON file storage backend");
            let store = JsonFileStore::open(&config.submissions_path).await?;
            Ok(Arc::new(store))
        }

        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; submissions are lost on restart");
            Ok(create_in_memory_store())
        }
    }
}

/// Create an in-memory store (for testing and development)
pub fn create_in_memory_store() -> Arc<dyn SubmissionStore> {
    tracing::info!("Initializing in-memory storage backend");
    Arc::new(InMemoryStore::new())
}
