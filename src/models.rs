//! Data models for the EON TV overlay

use serde::{Deserialize, Serialize};

/// Channel entry from the static channel list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRecord {
    /// Stable identifier, also shown as the channel number
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl ChannelRecord {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            logo: None,
        }
    }
}

/// Remote control actions
///
/// Only the channel actions are acted upon; the rest exist so every button
/// on the remote has a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    ChannelUp,
    ChannelDown,
    VolumeUp,
    VolumeDown,
    Mute,
    Enter,
}

/// Where the overlay is running, decided once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Inside the host page, sharing its DOM
    Injected,
    /// On its own origin (or the native preview), embedding the player in a frame
    Standalone,
}

impl ExecutionMode {
    /// Injected only when we are the top frame of the host domain or one of its subdomains.
    pub fn detect(hostname: &str, is_top_frame: bool, host_domain: &str) -> Self {
        if !is_top_frame || host_domain.is_empty() {
            return ExecutionMode::Standalone;
        }

        let hostname = hostname.trim_end_matches('.').to_ascii_lowercase();
        let domain = host_domain.trim_start_matches('.').to_ascii_lowercase();
        let on_host = hostname == domain
            || hostname
                .strip_suffix(domain.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'));

        if on_host {
            ExecutionMode::Injected
        } else {
            ExecutionMode::Standalone
        }
    }

    pub fn is_injected(&self) -> bool {
        matches!(self, ExecutionMode::Injected)
    }

    /// Badge text shown in the overlay header
    pub fn label(&self) -> &'static str {
        match self {
            ExecutionMode::Injected => "Native TV Mode",
            ExecutionMode::Standalone => "Setup Required",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_injected_on_host_domain() {
        assert_eq!(ExecutionMode::detect("eon.tv", true, "eon.tv"), ExecutionMode::Injected);
        assert_eq!(ExecutionMode::detect("www.eon.tv", true, "eon.tv"), ExecutionMode::Injected);
        assert_eq!(ExecutionMode::detect("WWW.EON.TV", true, "eon.tv"), ExecutionMode::Injected);
    }

    #[test]
    fn test_detect_standalone_when_framed() {
        assert_eq!(ExecutionMode::detect("eon.tv", false, "eon.tv"), ExecutionMode::Standalone);
    }

    #[test]
    fn test_detect_standalone_on_other_hosts() {
        assert_eq!(ExecutionMode::detect("localhost", true, "eon.tv"), ExecutionMode::Standalone);
        assert_eq!(ExecutionMode::detect("neon.tv", true, "eon.tv"), ExecutionMode::Standalone);
        assert_eq!(ExecutionMode::detect("eon.tv.example.com", true, "eon.tv"), ExecutionMode::Standalone);
        assert_eq!(ExecutionMode::detect("eon.tv", true, ""), ExecutionMode::Standalone);
    }

    #[test]
    fn test_channel_record_logo_optional() {
        let record: ChannelRecord = serde_json::from_str(r#"{"id":"3","name":"Prva"}"#).unwrap();
        assert_eq!(record, ChannelRecord::new("3", "Prva"));
        assert!(!serde_json::to_string(&record).unwrap().contains("logo"));
    }
}
