use crate::core::history::sort_newest_first;
use crate::domain::model::{HistoryRecord, NewHistoryRecord};
use crate::domain::ports::{HistoryStore, Storage};
use crate::utils::error::{MaintenanceError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use tokio::sync::Mutex;
use uuid::Uuid;

pub const DEFAULT_HISTORY_FILE: &str = "history.json";

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }

    async fn exists(&self, path: &str) -> bool {
        tokio::fs::try_exists(self.base_path.join(path))
            .await
            .unwrap_or(false)
    }
}

/// History kept as a JSON array in a single file of a `Storage` backend.
pub struct JsonHistoryStore<S: Storage> {
    storage: S,
    file_name: String,
    // serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl<S: Storage> JsonHistoryStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_file_name(storage, DEFAULT_HISTORY_FILE)
    }

    pub fn with_file_name(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Vec<HistoryRecord>> {
        if !self.storage.exists(&self.file_name).await {
            return Ok(Vec::new());
        }
        let data = self.storage.read_file(&self.file_name).await?;
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&data)?)
    }

    async fn persist(&self, records: &[HistoryRecord]) -> Result<()> {
        let json = serde_json::to_vec_pretty(records)?;
        self.storage.write_file(&self.file_name, &json).await
    }
}

#[async_trait]
impl<S: Storage> HistoryStore for JsonHistoryStore<S> {
    async fn create(&self, record: NewHistoryRecord) -> Result<HistoryRecord> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let saved = record.into_record(Uuid::new_v4().to_string(), Utc::now());
        records.push(saved.clone());
        self.persist(&records).await?;
        tracing::debug!("history file {} now holds {} records", self.file_name, records.len());
        Ok(saved)
    }

    async fn list(&self) -> Result<Vec<HistoryRecord>> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(MaintenanceError::NotFound { id: id.to_string() });
        }
        self.persist(&records).await
    }
}
