//! Layered TOML configuration for Dossier.
//!
//! Reads configuration from multiple sources with precedence:
//! CLI flags > env vars > config file > defaults

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The default research API base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Resolved configuration for a Dossier run.
#[derive(Debug, Clone)]
pub struct DossierConfig {
    pub api_base_url: String,
    pub config_dir: PathBuf,
}

/// Settings that can be read from a TOML config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub api: ApiSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSettings {
    pub base_url: Option<String>,
}

/// CLI overrides that take highest precedence.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_url: Option<String>,
}

impl DossierConfig {
    /// Load configuration from all sources, applying precedence rules.
    ///
    /// Precedence (highest to lowest):
    /// 1. CLI flags
    /// 2. `DOSSIER_API_URL`
    /// 3. Config file (~/.dossier/config.toml)
    /// 4. Default
    pub fn load(overrides: CliOverrides) -> Result<Self, dossier_types::ConfigError> {
        let config_dir = config_dir();
        let settings = load_settings_file(&config_dir.join("config.toml"));

        let api_base_url = overrides
            .api_url
            .or_else(|| std::env::var("DOSSIER_API_URL").ok())
            .or(settings.api.base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        validate_base_url(&api_base_url)?;

        Ok(DossierConfig {
            api_base_url,
            config_dir,
        })
    }
}

/// Get the Dossier config directory path (~/.dossier/).
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DOSSIER_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".dossier")
}

/// Load and parse a TOML settings file, returning defaults on any error.
fn load_settings_file(path: &std::path::Path) -> SettingsFile {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse {}: {}", path.display(), e);
            SettingsFile::default()
        }),
        Err(_) => SettingsFile::default(),
    }
}

/// The base URL must be reachable over http(s).
fn validate_base_url(url: &str) -> Result<(), dossier_types::ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(dossier_types::ConfigError::InvalidValue {
            key: "api.base_url".into(),
            message: format!("expected an http(s) URL, got '{url}'"),
        })
    }
}
