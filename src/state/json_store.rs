use crate::error::{AppError, Result};
use crate::models::{SubmissionData, SubmissionRecord};
use crate::state::SubmissionStore;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Persistent submission store backed by one flat JSON document
///
/// Every append is a read-modify-write of the whole file. The mutex keeps
/// appends from this process from interleaving; the file is replaced by
/// rename so readers never see a half-written document.
#[derive(Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    /// Open a store at `path`, creating the parent directory and an empty
    /// document if needed
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Storage(format!("Failed to create data directory {:?}: {}", parent, e))
            })?;
        }

        let store = Self {
            path,
            write_lock: Arc::new(Mutex::new(())),
        };

        let exists = tokio::fs::try_exists(&store.path).await.map_err(|e| {
            AppError::Storage(format!(
                "Failed to check submissions file {:?}: {}",
                store.path, e
            ))
        })?;
        if !exists {
            store.write(&SubmissionData::default()).await?;
            tracing::info!(path = ?store.path, "Initialized empty submissions file");
        }

        tracing::info!(path = ?store.path, "Opened JSON submission store");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document; a missing file reads as empty
    async fn read(&self) -> Result<SubmissionData> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::Storage(format!("Malformed submissions file {:?}: {}", self.path, e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SubmissionData::default()),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to read submissions file {:?}: {}",
                self.path, e
            ))),
        }
    }

    async fn write(&self, data: &SubmissionData) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(data)?;
        let temp_path = self.path.with_extension("json.tmp");

        tokio::fs::write(&temp_path, &bytes).await.map_err(|e| {
            AppError::Storage(format!("Failed to write {:?}: {}", temp_path, e))
        })?;
        tokio::fs::rename(&temp_path, &self.path).await.map_err(|e| {
            AppError::Storage(format!("Failed to replace {:?}: {}", self.path, e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl SubmissionStore for JsonFileStore {
    async fn snapshot(&self) -> Result<SubmissionData> {
        self.read().await
    }

    async fn append(&self, record: SubmissionRecord) -> Result<SubmissionRecord> {
        let _guard = self.write_lock.lock().await;

        let mut data = self.read().await?;
        let stored = data.insert(record);
        self.write(&data).await?;

        tracing::debug!(
            submission_id = %stored.id(),
            collection = stored.kind().collection(),
            "Submission persisted"
        );
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Submission, SubmissionKind, ServiceRequestDetails};
    use chrono::Utc;
    use tempfile::TempDir;

    fn service_record() -> SubmissionRecord {
        SubmissionRecord::Service(Submission::new(
            SubmissionKind::ServiceRequest,
            ServiceRequestDetails {
                name: "Grace".to_string(),
                email: "grace@example.com".to_string(),
                service: "web-development".to_string(),
                project_details: "Landing page".to_string(),
                ..Default::default()
            },
            Utc::now(),
        ))
    }

    #[tokio::test]
    async fn test_open_creates_empty_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("submissions.json");

        let store = JsonFileStore::open(&path).await.unwrap();
        assert!(path.exists());
        assert_eq!(store.path(), path.as_path());

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["contacts"], serde_json::json!([]));
        assert_eq!(raw["services"], serde_json::json!([]));
        assert_eq!(raw["internships"], serde_json::json!([]));
        assert_eq!(store.snapshot().await.unwrap().total(), 0);
    }

    #[tokio::test]
    async fn test_open_fails_when_path_cannot_be_checked() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad\0name.json");

        match JsonFileStore::open(&path).await {
            Err(AppError::Storage(msg)) => {
                assert!(msg.starts_with("Failed to check submissions file"), "{msg}")
            }
            Err(other) => panic!("expected storage error, got {other:?}"),
            Ok(_) => panic!("expected storage error"),
        }
    }

    #[tokio::test]
    async fn test_open_keeps_existing_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("submissions.json");
        JsonFileStore::open(&path).await.unwrap().append(service_record()).await.unwrap();

        let reopened = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(reopened.snapshot().await.unwrap().services.len(), 1);
    }

    #[tokio::test]
    async fn test_append_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("submissions.json");

        let store = JsonFileStore::open(&path).await.unwrap();
        let stored = store.append(service_record()).await.unwrap();
        assert!(stored.id().starts_with("service_"));

        let reopened = JsonFileStore::open(&path).await.unwrap();
        let data = reopened.snapshot().await.unwrap();
        assert_eq!(data.services.len(), 1);
        assert_eq!(data.services[0].id, stored.id());
        assert_eq!(data.services[0].data.project_details, "Landing page");
    }

    #[tokio::test]
    async fn test_missing_arrays_read_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("submissions.json");
        std::fs::write(&path, r#"{"contacts": []}"#).unwrap();

        let store = JsonFileStore::open(&path).await.unwrap();
        store.append(service_record()).await.unwrap();

        let data = store.snapshot().await.unwrap();
        assert_eq!(data.services.len(), 1);
        assert!(data.internships.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("submissions.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::open(&path).await.unwrap();
        let err = store.snapshot().await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert!(store.append(service_record()).await.is_err());
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_all_kept() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp_dir.path().join("submissions.json"))
            .await
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.append(service_record()).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let data = store.snapshot().await.unwrap();
        assert_eq!(data.services.len(), 8);

        let mut ids: Vec<_> = data.services.iter().map(|s| s.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }
}
