use crate::error::Result;
use crate::models::{SubmissionData, SubmissionRecord};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Trait for submission storage operations
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Read the whole submissions document
    async fn snapshot(&self) -> Result<SubmissionData>;

    /// Append a submission; returns the stored record with its final ID
    async fn append(&self, record: SubmissionRecord) -> Result<SubmissionRecord>;
}

/// In-memory submission store (for tests and ephemeral runs)
#[derive(Clone, Default)]
pub struct InMemoryStore {
    data: Arc<Mutex<SubmissionData>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing data
    pub fn with_data(data: SubmissionData) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }
}

#[async_trait]
impl SubmissionStore for InMemoryStore {
    async fn snapshot(&self) -> Result<SubmissionData> {
        Ok(self.data.lock().await.clone())
    }

    async fn append(&self, record: SubmissionRecord) -> Result<SubmissionRecord> {
        let stored = self.data.lock().await.insert(record);
        tracing::debug!(submission_id = %stored.id(), kind = %stored.kind(), "Submission saved");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactDetails, Submission, SubmissionKind};
    use chrono::Utc;

    #[tokio::test]
    async fn test_in_memory_append_and_snapshot() {
        let store = InMemoryStore::new();
        let now = Utc::now();
        let record = SubmissionRecord::Contact(Submission::new(
            SubmissionKind::Contact,
            ContactDetails::default(),
            now,
        ));

        let first = store.append(record.clone()).await.unwrap();
        let second = store.append(record).await.unwrap();
        assert_ne!(first.id(), second.id());

        let data = store.snapshot().await.unwrap();
        assert_eq!(data.contacts.len(), 2);
        assert_eq!(data.total(), 2);
    }

    #[tokio::test]
    async fn test_with_data_keeps_existing_ids_unique() {
        let now = Utc::now();
        let record = SubmissionRecord::Contact(Submission::new(
            SubmissionKind::Contact,
            ContactDetails::default(),
            now,
        ));

        let mut existing = SubmissionData::default();
        let seeded = existing.insert(record.clone());

        let store = InMemoryStore::with_data(existing);
        let appended = store.append(record).await.unwrap();
        assert_eq!(appended.id(), format!("{}_2", seeded.id()));
    }
}
