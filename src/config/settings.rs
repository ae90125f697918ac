//! Application settings.
//!
//! Settings start from built-in defaults, are optionally overlaid by a TOML file
//! (`config.toml` unless `SHOP_CONFIG` points elsewhere) and finally by
//! environment variables, so a bare `.env` is enough to run the shop.

use crate::core::catalog::ListingPolicy;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Secret used when nothing is configured. Startup warns when it is still in use.
pub const DEFAULT_SECRET_KEY: &str = "default_secret_key";

/// Top-level application settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `SeaORM` connection string
    pub database_url: String,
    /// Socket address the HTTP server binds to
    pub bind_addr: String,
    /// Application secret key
    pub secret_key: String,
    /// Image upload settings
    pub uploads: UploadSettings,
    /// Public catalog settings
    pub catalog: CatalogSettings,
}

/// Where uploaded images go and which ones are accepted
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Directory uploaded files are written to
    pub dir: PathBuf,
    /// Relative URL prefix stored in `image_url` and served over HTTP
    pub url_prefix: String,
    /// Lower-case file extensions accepted for images
    pub allowed_extensions: Vec<String>,
    /// Largest accepted admin form body, image included
    pub max_bytes: usize,
}

/// Storefront listing behaviour
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Which products the public listings show
    pub listing_policy: ListingPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "sqlite://data/farm.sqlite?mode=rwc".to_string(),
            bind_addr: "127.0.0.1:5000".to_string(),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            uploads: UploadSettings::default(),
            catalog: CatalogSettings::default(),
        }
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("static/uploads"),
            url_prefix: "static/uploads".to_string(),
            allowed_extensions: ["png", "jpg", "jpeg", "gif"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_bytes: 16 * 1024 * 1024,
        }
    }
}

impl Settings {
    /// Parses settings from a TOML string; missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse settings TOML: {e}"),
        })
    }

    /// Overlays values looked up by environment variable name.
    ///
    /// The lookup is injected so tests do not have to touch the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(addr) = lookup("BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(key) = lookup("SECRET_KEY") {
            self.secret_key = key;
        }
        if let Some(dir) = lookup("UPLOAD_FOLDER") {
            self.uploads.dir = PathBuf::from(dir);
        }
        if let Some(policy) = lookup("LISTING_POLICY") {
            self.catalog.listing_policy = policy.parse()?;
        }
        Ok(())
    }

    /// Whether the secret key was left at its built-in default.
    #[must_use]
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

/// Loads settings from `path` (if it exists) and the process environment.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed, or if an
/// environment override has an invalid value.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    let mut settings = if path_ref.exists() {
        tracing::debug!("Loading settings from {:?}", path_ref);
        let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
            message: format!("Failed to read settings file {path_ref:?}: {e}"),
        })?;
        Settings::from_toml_str(&contents)?
    } else {
        tracing::debug!("No settings file at {:?}, using defaults", path_ref);
        Settings::default()
    };

    settings.apply_env_overrides(|key| std::env::var(key).ok())?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.uploads.url_prefix, "static/uploads");
        assert_eq!(
            settings.uploads.allowed_extensions,
            vec!["png", "jpg", "jpeg", "gif"]
        );
        assert_eq!(settings.catalog.listing_policy, ListingPolicy::All);
        assert!(settings.uses_default_secret());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
            bind_addr = "0.0.0.0:8080"

            [uploads]
            dir = "/var/lib/shop/uploads"
            allowed_extensions = ["png"]

            [catalog]
            listing_policy = "available_only"
        "#;

        let settings = Settings::from_toml_str(toml_str).unwrap();
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
        assert_eq!(settings.uploads.dir, PathBuf::from("/var/lib/shop/uploads"));
        assert_eq!(settings.uploads.url_prefix, "static/uploads");
        assert_eq!(settings.uploads.allowed_extensions, vec!["png"]);
        assert_eq!(
            settings.catalog.listing_policy,
            ListingPolicy::AvailableOnly
        );
        assert!(settings.database_url.starts_with("sqlite://"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = Settings::from_toml_str("bind_addr = [");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("DATABASE_URL", "sqlite::memory:"),
            ("SECRET_KEY", "s3cret"),
            ("UPLOAD_FOLDER", "/tmp/uploads"),
            ("LISTING_POLICY", "available_only"),
        ]);

        let mut settings = Settings::default();
        settings
            .apply_env_overrides(|key| env.get(key).map(|v| (*v).to_string()))
            .unwrap();

        assert_eq!(settings.database_url, "sqlite::memory:");
        assert_eq!(settings.uploads.dir, PathBuf::from("/tmp/uploads"));
        assert_eq!(
            settings.catalog.listing_policy,
            ListingPolicy::AvailableOnly
        );
        assert!(!settings.uses_default_secret());
    }

    #[test]
    fn test_bad_listing_policy_override() {
        let mut settings = Settings::default();
        let result = settings.apply_env_overrides(|key| {
            (key == "LISTING_POLICY").then(|| "everything".to_string())
        });
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.uploads.allowed_extensions.len(), 4);
    }
}
