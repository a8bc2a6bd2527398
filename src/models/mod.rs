pub mod app_config;
pub mod oauth;
pub mod profile;

pub use app_config::{AppConfig, AppState, NameField, SettingsProvider};
