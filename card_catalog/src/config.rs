//! Application configuration: parsing, validation, and loading.
//!
//! A small TOML file points the app at its two data sources and sets the page
//! size for browse views:
//!
//! ```toml
//! database_url = "collection.db"
//! dataset_path = "cards.csv"
//! page_size = 12
//! ```
//!
//! Key behaviors:
//! - `page_size` is optional and defaults to [`DEFAULT_PAGE_SIZE`]; zero is
//!   rejected at parse time because the field is a `NonZeroUsize`.
//! - Unknown keys are errors, catching typos early.
//! - The `DATABASE_URL` environment variable overrides the file value.
//!
//! Entrypoints:
//! - Parse + validate from a TOML string: [`load_config_str`]
//! - Parse + validate from a file path: [`load_config_path`]

use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, bail};
use serde::Deserialize;
use toml::from_str;

/// Default number of cards per page in browse views.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(12) {
    Some(size) => size,
    None => unreachable!(),
};

/// Name of the environment variable that overrides `database_url`.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Application settings backing both the preference store and the catalog views.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// SQLite database location: a file path or `sqlite://` URL.
    pub database_url: String,
    /// Path to the card dataset CSV.
    pub dataset_path: PathBuf,
    /// Cards per page in browse views.
    #[serde(default = "default_page_size")]
    pub page_size: NonZeroUsize,
}

fn default_page_size() -> NonZeroUsize {
    DEFAULT_PAGE_SIZE
}

/// Parse and validate configuration from a TOML string.
///
/// Errors:
/// - TOML parse failures (unknown keys, zero page size, wrong types)
/// - An empty `database_url` or `dataset_path`
pub fn load_config_str(toml_str: &str) -> anyhow::Result<AppConfig> {
    let cfg: AppConfig = from_str(toml_str).context("failed to parse config TOML")?;

    if cfg.database_url.trim().is_empty() {
        bail!("database_url cannot be empty");
    }
    if cfg.dataset_path.as_os_str().is_empty() {
        bail!("dataset_path cannot be empty");
    }

    Ok(cfg)
}

/// Read a config TOML file from disk, parse, and validate it.
///
/// See [`load_config_str`] for details on validation.
pub fn load_config_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<AppConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read config file {}", path.as_ref().display()))?;
    load_config_str(&text)
}

/// The effective database URL: [`DATABASE_URL_VAR`] from the environment wins
/// over the config file value.
pub fn effective_database_url(config: &AppConfig) -> String {
    std::env::var(DATABASE_URL_VAR).unwrap_or_else(|_| config.database_url.clone())
}
