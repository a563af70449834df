use crate::domain::model::{HistoryRecord, MaintenanceInput, MaintenanceResult, NewHistoryRecord};
use crate::domain::ports::HistoryStore;
use crate::utils::error::Result;
use chrono::NaiveDate;

/// Saves, lists and deletes past calculations through a `HistoryStore`.
pub struct HistoryService<H: HistoryStore + ?Sized> {
    store: Box<H>,
}

impl<H: HistoryStore + ?Sized> HistoryService<H> {
    pub fn new(store: Box<H>) -> Self {
        Self { store }
    }

    pub async fn save(
        &self,
        input: &MaintenanceInput,
        result: &MaintenanceResult,
        calculation_date: NaiveDate,
    ) -> Result<HistoryRecord> {
        let record = NewHistoryRecord::from_calculation(input, result, calculation_date);
        let saved = self.store.create(record).await?;
        tracing::info!(id = %saved.id, date = %saved.calculation_date, "saved calculation");
        Ok(saved)
    }

    pub async fn list(&self) -> Result<Vec<HistoryRecord>> {
        let records = self.store.list().await?;
        tracing::debug!("loaded {} history records", records.len());
        Ok(records)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(id).await?;
        tracing::info!(id, "deleted calculation");
        Ok(())
    }
}

/// Newest calculation date first; same-day rows newest insert first.
pub fn sort_newest_first(records: &mut [HistoryRecord]) {
    records.sort_by(|a, b| {
        b.calculation_date
            .cmp(&a.calculation_date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
