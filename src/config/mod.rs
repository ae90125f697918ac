/// Database connection and schema bootstrap
pub mod database;

/// Application settings loaded from config.toml and the environment
pub mod settings;

pub use settings::{CatalogSettings, Settings, UploadSettings, load_settings};
