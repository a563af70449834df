use crate::adapters::http::DEFAULT_TABLE;
use crate::core::calculator::DEFAULT_ROUNDING_UNIT;
use crate::core::formatter::LocaleConfig;
use crate::core::reminders::default_events;
use crate::core::share::ShareConfig;
use crate::core::ConfigProvider;
use crate::domain::model::ReminderEvent;
use crate::utils::error::{MaintenanceError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_STORE_DIR: &str = "./maintenance-data";

/// Settings file, every section optional:
///
/// ```toml
/// [calculation]
/// rounding_unit = 500
///
/// [locale]
/// currency_symbol = "₹"
/// grouping = "indian"
///
/// [share]
/// due_in_days = 7
///
/// [store]
/// location = "https://example.supabase.co"
/// api_key = "${SUPABASE_KEY}"
///
/// [[reminders]]
/// id = "1"
/// title = "Annual Water Tank Cleaning"
/// date = "2025-01-15"
/// kind = "annual"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub calculation: CalculationConfig,
    pub locale: LocaleConfig,
    pub share: ShareConfig,
    pub store: StoreConfig,
    pub reminders: Vec<ReminderEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationConfig {
    pub rounding_unit: u64,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            rounding_unit: DEFAULT_ROUNDING_UNIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory for the JSON history file, or an http(s) base URL of the hosted table.
    pub location: String,
    pub table: String,
    pub api_key: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_STORE_DIR.to_string(),
            table: DEFAULT_TABLE.to_string(),
            api_key: None,
        }
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MaintenanceError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Configured reminders, or the built-in ones anchored in `year`.
    pub fn reminder_events(&self, year: i32) -> Vec<ReminderEvent> {
        if self.reminders.is_empty() {
            default_events(year)
        } else {
            self.reminders.clone()
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_positive_number(
            "calculation.rounding_unit",
            self.calculation.rounding_unit,
            1,
        )?;
        crate::utils::validation::validate_non_empty_string(
            "locale.currency_symbol",
            &self.locale.currency_symbol,
        )?;
        crate::utils::validation::validate_url("share.base_url", &self.share.base_url)?;
        crate::utils::validation::validate_non_empty_string("store.table", &self.store.table)?;

        let location = &self.store.location;
        if location.starts_with("http://") || location.starts_with("https://") {
            crate::utils::validation::validate_url("store.location", location)?;
        } else {
            crate::utils::validation::validate_path("store.location", location)?;
        }

        if let Some(key) = &self.store.api_key {
            if key.starts_with("${") {
                return Err(MaintenanceError::MissingConfig {
                    field: format!("environment variable for store.api_key ({})", key),
                });
            }
        }

        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn rounding_unit(&self) -> u64 {
        self.calculation.rounding_unit
    }

    fn locale(&self) -> &LocaleConfig {
        &self.locale
    }

    fn share(&self) -> &ShareConfig {
        &self.share
    }

    fn store_location(&self) -> Option<&str> {
        Some(self.store.location.as_str()).filter(|l| !l.is_empty())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::formatter::Grouping;
    use crate::domain::model::EventKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config.rounding_unit(), 500);
        assert_eq!(config.locale().currency_symbol, "₹");
        assert_eq!(config.share().due_in_days, 7);
        assert_eq!(config.store_location(), Some(DEFAULT_STORE_DIR));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[calculation]
rounding_unit = 100

[locale]
locale = "en-US"
currency_symbol = "$"
grouping = "western"

[share]
due_in_days = 10
default_phone = "919876543210"

[store]
location = "https://db.example.com"
table = "maintenance_history"

[[reminders]]
id = "a"
title = "Lift Service"
date = "2026-11-20"
kind = "one-time"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.rounding_unit(), 100);
        assert_eq!(config.locale.grouping, Grouping::Western);
        assert_eq!(config.locale.date_format, "%-d %B %Y");
        assert_eq!(config.share.due_in_days, 10);
        assert_eq!(config.share.base_url, "https://wa.me/");
        assert_eq!(config.reminders.len(), 1);
        assert_eq!(config.reminders[0].kind, EventKind::OneTime);
        assert_eq!(config.reminder_events(2026).len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FLAT_MAINTENANCE_TEST_KEY", "secret-key");

        let toml_content = r#"
[store]
location = "https://db.example.com"
api_key = "${FLAT_MAINTENANCE_TEST_KEY}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.store.api_key.as_deref(), Some("secret-key"));

        std::env::remove_var("FLAT_MAINTENANCE_TEST_KEY");
    }

    #[test]
    fn test_unresolved_env_var_fails_validation() {
        let toml_content = r#"
[store]
api_key = "${FLAT_MAINTENANCE_UNSET_VARIABLE}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, MaintenanceError::MissingConfig { .. }));
    }

    #[test]
    fn test_zero_rounding_unit_fails_validation() {
        let config = AppConfig::from_toml_str("[calculation]\nrounding_unit = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = AppConfig::from_toml_str("[calculation\n").unwrap_err();
        assert!(matches!(err, MaintenanceError::TomlParse(_)));
    }

    #[test]
    fn test_default_reminders_when_none_configured() {
        let config = AppConfig::default();
        let events = config.reminder_events(2026);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "Annual Water Tank Cleaning");
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[calculation]\nrounding_unit = 250").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.rounding_unit(), 250);
    }
}
