//! Application configuration.
//!
//! Backend endpoint and credentials are loaded once at process start from
//! a TOML file in the platform config directory. A missing file yields the
//! defaults; the app never writes config without an explicit save.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Follow the system theme.
    #[default]
    System,
    /// Dark theme
    Dark,
    /// Light theme
    Light,
}

impl std::fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemePreference::System => write!(f, "System"),
            ThemePreference::Dark => write!(f, "Dark"),
            ThemePreference::Light => write!(f, "Light"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Backend settings
    pub backend: BackendSettings,
    /// Change-notification settings
    pub realtime: RealtimeSettings,
    /// Prayer times settings
    pub prayer: PrayerSettings,
    /// UI settings
    pub ui: UiSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            backend: BackendSettings::default(),
            realtime: RealtimeSettings::default(),
            prayer: PrayerSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

/// Hosted table-store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL of the hosted backend, e.g. `https://project.example.co`
    pub url: String,
    /// API key sent with every request
    pub api_key: String,
    /// Id of the signed-in user profile
    pub user_id: Option<Uuid>,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            user_id: None,
            request_timeout_secs: 15,
        }
    }
}

/// Change-notification channel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeSettings {
    /// Subscribe to table changes on startup
    pub enabled: bool,
    /// Override the websocket endpoint (derived from the backend URL when empty)
    pub endpoint: String,
    /// Tables whose changes trigger a refetch
    pub tables: Vec<String>,
    /// Heartbeat interval in seconds
    pub heartbeat_secs: u64,
}

impl Default for RealtimeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: String::new(),
            tables: vec![
                "attendance".to_string(),
                "setoran".to_string(),
                "siswa_poin".to_string(),
            ],
            heartbeat_secs: 30,
        }
    }
}

/// Prayer times settings.
///
/// A desktop install has no device geolocation; coordinates are fixed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrayerSettings {
    /// Show the prayer times card on the dashboard
    pub enabled: bool,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Display name for the configured location
    pub location_name: String,
}

impl Default for PrayerSettings {
    fn default() -> Self {
        // Yogyakarta
        Self {
            enabled: true,
            latitude: -7.7956,
            longitude: 110.3695,
            location_name: "Yogyakarta".to_string(),
        }
    }
}

/// UI-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Theme preference
    pub theme: ThemePreference,
    /// Font scale multiplier
    pub font_scale: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: ThemePreference::System,
            font_scale: 1.0,
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("org", "tahfidz", "Tahfidz")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from file.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path = get_config_path();

    if !path.exists() {
        let config = AppConfig {
            data_dir: get_data_dir(),
            ..Default::default()
        };
        return Ok(config);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.data_dir = get_data_dir();

    Ok(config)
}

/// Save application configuration to file.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    let path = get_config_path();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
