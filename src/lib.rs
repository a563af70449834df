pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::{JsonHistoryStore, LocalStorage};
pub use config::AppConfig;
pub use crate::core::calculator::{calculate, Calculator, DEFAULT_ROUNDING_UNIT};
pub use crate::core::formatter::{CurrencyFormatter, LocaleConfig};
pub use crate::core::share::{build_share_link, build_share_message};
pub use domain::model::{MaintenanceInput, MaintenanceResult};
pub use utils::error::{MaintenanceError, Result};
