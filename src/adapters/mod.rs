// Adapters layer: concrete implementations for external systems (files, hosted history table).

pub mod http;
pub mod storage;

use crate::domain::ports::HistoryStore;
use crate::utils::error::Result;

/// Picks a history backend from a location: `http(s)://` URLs use the hosted
/// table, anything else is a directory for the JSON history file.
pub fn open_history_store(
    location: &str,
    table: &str,
    api_key: Option<String>,
) -> Result<Box<dyn HistoryStore>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        tracing::debug!("using hosted history table at {}", location);
        Ok(Box::new(http::RestHistoryStore::new(location, table, api_key)?))
    } else {
        crate::utils::validation::validate_path("store", location)?;
        tracing::debug!("using local history file under {}", location);
        Ok(Box::new(storage::JsonHistoryStore::new(
            storage::LocalStorage::new(location),
        )))
    }
}
