use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default net pull distance (logical px) that commits a refresh
pub const DEFAULT_THRESHOLD_DISTANCE: f64 = 200.0;

/// Default delay before the refresh listener is invoked
pub const DEFAULT_REFRESH_DELAY_SECS: f64 = 2.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Enable pull-to-refresh at startup
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Net pull distance in logical pixels that commits a refresh
    #[serde(default = "default_threshold_distance")]
    pub threshold_distance: f64,
    /// Seconds between release and the refresh callback
    #[serde(default = "default_refresh_delay")]
    pub refresh_delay_secs: f64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            threshold_distance: default_threshold_distance(),
            refresh_delay_secs: default_refresh_delay(),
        }
    }
}

/// Easing curve for indicator animations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    /// Jump to the end position when the duration elapses
    None,
    Linear,
    /// 1 - (1-t)^3
    Cubic,
    /// 1 - (1-t)^5
    Quintic,
    /// 1 - 2^(-10t)
    EaseOut,
    /// Cubic ease-in-out
    #[default]
    EaseInOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Hide animation after a completed refresh (milliseconds)
    #[serde(default = "default_complete_hide_ms")]
    pub complete_hide_ms: u64,
    /// Hide animation when the pull is released below the threshold (milliseconds)
    #[serde(default = "default_cancel_hide_ms")]
    pub cancel_hide_ms: u64,
    /// Easing curve for both hide animations
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate used while an animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            complete_hide_ms: default_complete_hide_ms(),
            cancel_hide_ms: default_cancel_hide_ms(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Logical pixels per terminal row
    #[serde(default = "default_row_height")]
    pub row_height_px: f64,
    /// Height of the loading indicator in rows
    #[serde(default = "default_indicator_rows")]
    pub indicator_rows: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            row_height_px: default_row_height(),
            indicator_rows: default_indicator_rows(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("refreshable")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_threshold_distance() -> f64 {
    DEFAULT_THRESHOLD_DISTANCE
}

fn default_refresh_delay() -> f64 {
    DEFAULT_REFRESH_DELAY_SECS
}

fn default_complete_hide_ms() -> u64 {
    500
}

fn default_cancel_hide_ms() -> u64 {
    200
}

fn default_animation_fps() -> u32 {
    60
}

fn default_tick_rate() -> u64 {
    100
}

fn default_row_height() -> f64 {
    20.0
}

fn default_indicator_rows() -> u16 {
    1
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default location or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults if it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Render configuration as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to the default location
    pub fn save(&self) -> crate::Result<PathBuf> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(config_path)
    }

    /// Get the configuration file path
    /// Always uses ~/.config/refreshable/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("refreshable")
            .join("config.toml")
    }

    /// Get the log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("refreshable.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.refresh.enabled);
        assert_eq!(config.refresh.threshold_distance, 200.0);
        assert_eq!(config.refresh.refresh_delay_secs, 2.0);
        assert_eq!(config.animation.complete_hide_ms, 500);
        assert_eq!(config.animation.cancel_hide_ms, 200);
        assert_eq!(config.animation.easing, EasingType::EaseInOut);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [refresh]
            threshold_distance = 120.0

            [animation]
            easing = "quintic"
            "#,
        )
        .unwrap();

        assert_eq!(config.refresh.threshold_distance, 120.0);
        assert_eq!(config.refresh.refresh_delay_secs, 2.0);
        assert_eq!(config.animation.easing, EasingType::Quintic);
        assert_eq!(config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[refresh]\nthreshold_distance = \"far\"").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_toml_round_trip_keeps_easing_name() {
        let text = AppConfig::default().to_toml().unwrap();
        assert!(text.contains("easing = \"ease-in-out\""));
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.animation.cancel_hide_ms, 200);
    }

    #[test]
    fn test_load_from_missing_file_returns_defaults() {
        let path = std::env::temp_dir().join("refreshable-missing-config-test.toml");
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.refresh.threshold_distance, DEFAULT_THRESHOLD_DISTANCE);
    }
}
