use crate::config::toml_config::AppConfig;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "flat-maintenance")]
#[command(about = "Split monthly apartment bills into a rounded per-flat maintenance charge")]
pub struct CliConfig {
    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// History location: a directory, or the http(s) URL of the hosted table
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// API key for the hosted history table
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Calculate this month's maintenance per flat
    Calculate(CalculateArgs),

    /// Saved calculations
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Upcoming reminder events
    Reminders {
        #[arg(long, default_value = "3")]
        limit: usize,

        /// Only events falling on this day (YYYY-MM-DD)
        #[arg(long)]
        on: Option<NaiveDate>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct CalculateArgs {
    #[arg(long)]
    pub electricity: String,

    #[arg(long)]
    pub water: String,

    #[arg(long)]
    pub watchman: String,

    #[arg(long)]
    pub garbage: String,

    #[arg(long)]
    pub flats: String,

    /// Overrides calculation.rounding_unit
    #[arg(long)]
    pub rounding_unit: Option<u64>,

    /// Payment due date (YYYY-MM-DD), defaults to a week from today
    #[arg(long)]
    pub due_date: Option<NaiveDate>,

    /// Print the share message and click-to-chat link
    #[arg(long)]
    pub share: bool,

    /// Recipient for the share link
    #[arg(long)]
    pub phone: Option<String>,

    /// Save the calculation to history
    #[arg(long)]
    pub save: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum HistoryAction {
    List,
    Delete { id: String },
    /// Write all saved calculations to a CSV spreadsheet
    Export { file: PathBuf },
}

impl CliConfig {
    /// Loads the settings file (if any) and applies command line overrides.
    pub fn resolve(&self) -> crate::utils::error::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                AppConfig::from_file(path)?
            }
            None => AppConfig::default(),
        };

        if let Some(store) = &self.store {
            config.store.location = store.clone();
        }
        if let Some(key) = &self.api_key {
            config.store.api_key = Some(key.clone());
        }
        if let Command::Calculate(args) = &self.command {
            if let Some(unit) = args.rounding_unit {
                tracing::info!("🔧 Rounding unit overridden to: {}", unit);
                config.calculation.rounding_unit = unit;
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calculate_command() {
        let cli = CliConfig::try_parse_from([
            "flat-maintenance",
            "calculate",
            "--electricity",
            "5000",
            "--water",
            "2000",
            "--watchman",
            "8000",
            "--garbage",
            "1500",
            "--flats",
            "12",
            "--due-date",
            "2026-10-30",
            "--rounding-unit",
            "100",
            "--share",
        ])
        .unwrap();

        let Command::Calculate(args) = &cli.command else {
            panic!("expected calculate");
        };
        assert_eq!(args.flats, "12");
        assert_eq!(args.due_date, NaiveDate::from_ymd_opt(2026, 10, 30));
        assert!(args.share);
        assert!(!args.save);

        let config = cli.resolve().unwrap();
        assert_eq!(config.calculation.rounding_unit, 100);
    }

    #[test]
    fn test_global_store_override() {
        let cli = CliConfig::try_parse_from([
            "flat-maintenance",
            "history",
            "list",
            "--store",
            "/tmp/maintenance",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Command::History {
                action: HistoryAction::List
            }
        ));
        assert_eq!(cli.resolve().unwrap().store.location, "/tmp/maintenance");
    }

    #[test]
    fn test_reminders_defaults() {
        let cli = CliConfig::try_parse_from(["flat-maintenance", "reminders"]).unwrap();
        match cli.command {
            Command::Reminders { limit, on } => {
                assert_eq!(limit, 3);
                assert!(on.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
