//! Configuration management
//!
//! The channel lineup and player location are static data. Every field has a
//! default, so a config file only needs to list what it overrides.

use std::time::Duration;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::channels::{builtin_channels, ChannelRegistry, DEFAULT_CHANNEL_ID};
use crate::error::ConfigError;
use crate::models::ChannelRecord;
use crate::visibility::DEFAULT_IDLE_TIMEOUT;

pub const DEFAULT_PLAYER_BASE_URL: &str = "https://eon.tv/#/player/";
pub const DEFAULT_HOST_DOMAIN: &str = "eon.tv";
pub const DEFAULT_OVERLAY_ROOT_ID: &str = "root-tv-overlay";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "builtin_channels")]
    pub channels: Vec<ChannelRecord>,
    #[serde(default = "default_channel_id")]
    pub default_channel_id: String,
    #[serde(default = "default_player_base_url")]
    pub player_base_url: String,
    #[serde(default = "default_host_domain")]
    pub host_domain: String,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: f32,
    #[serde(default = "default_overlay_root_id")]
    pub overlay_root_id: String,
    #[serde(default = "default_video_selector")]
    pub video_selector: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_channel_id() -> String { DEFAULT_CHANNEL_ID.to_string() }
fn default_player_base_url() -> String { DEFAULT_PLAYER_BASE_URL.to_string() }
fn default_host_domain() -> String { DEFAULT_HOST_DOMAIN.to_string() }
fn default_idle_timeout() -> f32 { 8.0 }
fn default_overlay_root_id() -> String { DEFAULT_OVERLAY_ROOT_ID.to_string() }
fn default_video_selector() -> String { "video".to_string() }
fn default_log_level() -> String { "info".to_string() }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            channels: builtin_channels(),
            default_channel_id: default_channel_id(),
            player_base_url: default_player_base_url(),
            host_domain: default_host_domain(),
            idle_timeout_secs: default_idle_timeout(),
            overlay_root_id: default_overlay_root_id(),
            video_selector: default_video_selector(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validated channel list. An empty lineup is fatal.
    pub fn registry(&self) -> Result<ChannelRegistry, ConfigError> {
        ChannelRegistry::new(self.channels.clone())
    }

    /// Idle timeout, falling back to the default for anything but a positive representable duration
    pub fn idle_timeout(&self) -> Duration {
        if self.idle_timeout_secs > 0.0 {
            if let Ok(timeout) = Duration::try_from_secs_f32(self.idle_timeout_secs) {
                return timeout;
            }
        }
        DEFAULT_IDLE_TIMEOUT
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AppConfig {
    fn config_path() -> std::path::PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
        path.push("eon_tv_overlay");
        path.push("config.json");
        path
    }

    /// Load the preview config, or defaults if there is none.
    ///
    /// A file that exists but does not parse is reported rather than ignored.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_json(&content),
            Err(_) => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.idle_timeout(), Duration::from_secs(8));
        assert_eq!(config.overlay_root_id, "root-tv-overlay");
        assert_eq!(config.video_selector, "video");
        assert_eq!(config.log_level(), LevelFilter::Info);
        assert!(config.registry().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AppConfig::from_json(r#"{"player_base_url": "https://x/play/", "idle_timeout_secs": 3}"#).unwrap();
        assert_eq!(config.player_base_url, "https://x/play/");
        assert_eq!(config.idle_timeout(), Duration::from_secs(3));
        assert_eq!(config.channels, builtin_channels());
        assert_eq!(config.host_domain, "eon.tv");
    }

    #[test]
    fn test_channels_from_json() {
        let config = AppConfig::from_json(
            r#"{"channels": [{"id": "A", "name": "Alpha"}, {"id": "B", "name": "Beta", "logo": "b.png"}], "default_channel_id": "B"}"#,
        )
        .unwrap();
        let registry = config.registry().unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(1).unwrap().logo.as_deref(), Some("b.png"));
    }

    #[test]
    fn test_empty_channel_list_is_fatal() {
        let config = AppConfig::from_json(r#"{"channels": []}"#).unwrap();
        assert_eq!(config.registry(), Err(ConfigError::EmptyRegistry));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(AppConfig::from_json("{not json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_timeout_and_level_fall_back() {
        let config = AppConfig::from_json(r#"{"idle_timeout_secs": -1, "log_level": "loud"}"#).unwrap();
        assert_eq!(config.idle_timeout(), Duration::from_secs(8));
        assert_eq!(config.log_level(), LevelFilter::Info);

        for huge in ["1e30", "3.4e38"] {
            let config = AppConfig::from_json(&format!(r#"{{"idle_timeout_secs": {}}}"#, huge)).unwrap();
            assert_eq!(config.idle_timeout(), Duration::from_secs(8));
        }
    }
}
