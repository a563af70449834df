pub mod breakdown;
pub mod calculator;
pub mod clock;
pub mod export;
pub mod formatter;
pub mod history;
pub mod reminders;
pub mod share;

pub use crate::domain::model::{
    EventKind, HistoryRecord, MaintenanceInput, MaintenanceResult, NewHistoryRecord, ReminderEvent,
};
pub use crate::domain::ports::{Clock, ConfigProvider, HistoryStore, Storage};
pub use crate::utils::error::Result;
