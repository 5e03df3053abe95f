//! Settings persistence and the typed export configuration

pub mod export_config;
pub mod store;

pub use export_config::ExportConfig;
pub use store::{JsonSettingsStore, SettingsStore};
