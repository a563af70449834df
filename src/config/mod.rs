#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CalculateArgs, CliConfig, Command, HistoryAction};
pub use toml_config::AppConfig;
