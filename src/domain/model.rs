use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The four monthly bills and the number of flats sharing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceInput {
    pub electricity: u64,
    pub water: u64,
    pub watchman: u64,
    pub garbage: u64,
    pub number_of_flats: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceResult {
    pub total_expense: u64,
    pub raw_cost_per_flat: f64,
    pub rounded_cost_per_flat: u64,
    pub total_collected: u64,
    /// Negative when rounding pulled the per-flat charge below the average.
    pub surplus: i64,
}

/// A row of the `maintenance_history` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    pub calculation_date: NaiveDate,
    pub electricity: u64,
    pub water: u64,
    pub watchman: u64,
    pub garbage: u64,
    pub number_of_flats: u32,
    pub total_expense: u64,
    pub cost_per_flat: u64,
    pub total_collected: u64,
    pub surplus: i64,
    pub created_at: DateTime<Utc>,
}

/// A history row before the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHistoryRecord {
    pub calculation_date: NaiveDate,
    pub electricity: u64,
    pub water: u64,
    pub watchman: u64,
    pub garbage: u64,
    pub number_of_flats: u32,
    pub total_expense: u64,
    pub cost_per_flat: u64,
    pub total_collected: u64,
    pub surplus: i64,
}

impl NewHistoryRecord {
    pub fn from_calculation(
        input: &MaintenanceInput,
        result: &MaintenanceResult,
        calculation_date: NaiveDate,
    ) -> Self {
        Self {
            calculation_date,
            electricity: input.electricity,
            water: input.water,
            watchman: input.watchman,
            garbage: input.garbage,
            number_of_flats: input.number_of_flats,
            total_expense: result.total_expense,
            cost_per_flat: result.rounded_cost_per_flat,
            total_collected: result.total_collected,
            surplus: result.surplus,
        }
    }

    pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> HistoryRecord {
        HistoryRecord {
            id,
            calculation_date: self.calculation_date,
            electricity: self.electricity,
            water: self.water,
            watchman: self.watchman,
            garbage: self.garbage,
            number_of_flats: self.number_of_flats,
            total_expense: self.total_expense,
            cost_per_flat: self.cost_per_flat,
            total_collected: self.total_collected,
            surplus: self.surplus,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Annual,
    Monthly,
    OneTime,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Annual => "annual",
            EventKind::Monthly => "monthly",
            EventKind::OneTime => "one-time",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderEvent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub kind: EventKind,
    #[serde(default)]
    pub description: Option<String>,
}
