use crate::core::formatter::LocaleConfig;
use crate::core::share::ShareConfig;
use crate::domain::model::{HistoryRecord, NewHistoryRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

/// Persistence for past calculations. `list` returns newest calculation date first.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn create(&self, record: NewHistoryRecord) -> Result<HistoryRecord>;
    async fn list(&self) -> Result<Vec<HistoryRecord>>;
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Source of "today" for due dates and month labels.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub trait ConfigProvider: Send + Sync {
    fn rounding_unit(&self) -> u64;
    fn locale(&self) -> &LocaleConfig;
    fn share(&self) -> &ShareConfig;
    fn store_location(&self) -> Option<&str>;
}
