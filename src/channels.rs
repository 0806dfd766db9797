//! Channel registry - the ordered, static channel list

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::models::ChannelRecord;

pub const DEFAULT_CHANNEL_ID: &str = "1";

/// Ordered channel list. Never empty, ids are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRegistry {
    channels: Vec<ChannelRecord>,
}

impl ChannelRegistry {
    pub fn new(channels: Vec<ChannelRecord>) -> Result<Self, ConfigError> {
        if channels.is_empty() {
            return Err(ConfigError::EmptyRegistry);
        }

        let mut seen = HashSet::with_capacity(channels.len());
        for channel in &channels {
            if !seen.insert(channel.id.as_str()) {
                return Err(ConfigError::DuplicateChannel(channel.id.clone()));
            }
        }

        Ok(Self { channels })
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// False for any registry that passed validation
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ChannelRecord> {
        self.channels.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.channels.iter().position(|c| c.id == id)
    }

    pub fn as_slice(&self) -> &[ChannelRecord] {
        &self.channels
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChannelRecord> {
        self.channels.iter()
    }
}

/// Built-in channel lineup used when no config file overrides it
pub fn builtin_channels() -> Vec<ChannelRecord> {
    [
        ("1", "RTS 1"),
        ("2", "RTS 2"),
        ("3", "Prva"),
        ("4", "Pink"),
        ("5", "Nova S"),
        ("6", "N1"),
        ("7", "Arena Sport 1"),
        ("8", "Sport Klub 1"),
    ]
    .iter()
    .map(|(id, name)| ChannelRecord::new(id, name))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry_is_rejected() {
        assert_eq!(ChannelRegistry::new(Vec::new()), Err(ConfigError::EmptyRegistry));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let channels = vec![
            ChannelRecord::new("1", "One"),
            ChannelRecord::new("2", "Two"),
            ChannelRecord::new("1", "Uno"),
        ];
        assert_eq!(
            ChannelRegistry::new(channels),
            Err(ConfigError::DuplicateChannel("1".to_string()))
        );
    }

    #[test]
    fn test_registry_keeps_order() {
        let registry = ChannelRegistry::new(builtin_channels()).unwrap();
        assert_eq!(registry.len(), 8);
        assert_eq!(registry.get(0).unwrap().name, "RTS 1");
        assert_eq!(registry.position("6"), Some(5));
        assert_eq!(registry.position("99"), None);
        assert!(registry.iter().map(|c| c.id.as_str()).eq(["1", "2", "3", "4", "5", "6", "7", "8"]));
    }

    #[test]
    fn test_builtin_default_is_present() {
        let registry = ChannelRegistry::new(builtin_channels()).unwrap();
        assert!(registry.position(DEFAULT_CHANNEL_ID).is_some());
    }
}
