//! Active channel tracking with wraparound navigation

use log::warn;

use crate::channels::ChannelRegistry;
use crate::models::{ChannelRecord, ControlAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Emitted on every successful channel change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelChange {
    pub index: usize,
    pub channel: ChannelRecord,
}

#[derive(Debug, Clone)]
pub struct ChannelCursor {
    registry: ChannelRegistry,
    index: usize,
}

impl ChannelCursor {
    /// Starts on `default_id`, or on the first channel if that id is unknown.
    pub fn new(registry: ChannelRegistry, default_id: &str) -> Self {
        let index = registry.position(default_id).unwrap_or_else(|| {
            warn!("Default channel '{}' not in channel list, starting on the first channel", default_id);
            0
        });
        Self { registry, index }
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    pub fn active_index(&self) -> usize {
        self.index
    }

    pub fn active(&self) -> &ChannelRecord {
        // index is always < len and the registry is never empty
        &self.registry.as_slice()[self.index]
    }

    pub fn advance(&mut self, direction: Direction) -> ChannelChange {
        let len = self.registry.len();
        self.index = match direction {
            Direction::Next => (self.index + 1) % len,
            Direction::Previous => (self.index + len - 1) % len,
        };
        self.change()
    }

    /// Jump straight to a channel. Unknown ids leave the cursor untouched.
    pub fn select(&mut self, id: &str) -> Option<ChannelChange> {
        let index = self.registry.position(id)?;
        self.index = index;
        Some(self.change())
    }

    /// Channel up/down move the cursor; every other action is ignored here.
    pub fn apply(&mut self, action: ControlAction) -> Option<ChannelChange> {
        match action {
            ControlAction::ChannelUp => Some(self.advance(Direction::Next)),
            ControlAction::ChannelDown => Some(self.advance(Direction::Previous)),
            _ => None,
        }
    }

    fn change(&self) -> ChannelChange {
        ChannelChange {
            index: self.index,
            channel: self.active().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(ids: &[&str]) -> ChannelRegistry {
        ChannelRegistry::new(ids.iter().map(|id| ChannelRecord::new(id, &format!("Channel {}", id))).collect())
            .unwrap()
    }

    #[test]
    fn test_default_channel_is_selected() {
        let cursor = ChannelCursor::new(registry(&["A", "B", "C"]), "B");
        assert_eq!(cursor.active().id, "B");
        assert_eq!(cursor.active_index(), 1);
    }

    #[test]
    fn test_missing_default_falls_back_to_first() {
        let cursor = ChannelCursor::new(registry(&["A", "B", "C"]), "Z");
        assert_eq!(cursor.active().id, "A");
    }

    #[test]
    fn test_channel_up_wraps() {
        let mut cursor = ChannelCursor::new(registry(&["A", "B", "C"]), "B");
        assert_eq!(cursor.advance(Direction::Next).channel.id, "C");
        assert_eq!(cursor.advance(Direction::Next).channel.id, "A");
    }

    #[test]
    fn test_channel_down_wraps() {
        let mut cursor = ChannelCursor::new(registry(&["A", "B", "C"]), "A");
        let change = cursor.advance(Direction::Previous);
        assert_eq!(change.index, 2);
        assert_eq!(change.channel.id, "C");
    }

    #[test]
    fn test_next_then_previous_round_trips() {
        for n in 1..=6 {
            let ids: Vec<String> = (0..n).map(|i| i.to_string()).collect();
            let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
            for start in &ids {
                let mut cursor = ChannelCursor::new(registry(&ids), start);
                cursor.advance(Direction::Next);
                cursor.advance(Direction::Previous);
                assert_eq!(cursor.active().id, *start, "n={} start={}", n, start);
            }
        }
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let ids = ["1", "2", "3", "4", "5"];
        for start in ids {
            let mut cursor = ChannelCursor::new(registry(&ids), start);
            for _ in 0..ids.len() {
                cursor.advance(Direction::Next);
            }
            assert_eq!(cursor.active().id, start);
        }
    }

    #[test]
    fn test_single_channel_stays_put() {
        let mut cursor = ChannelCursor::new(registry(&["only"]), "only");
        assert_eq!(cursor.advance(Direction::Next).channel.id, "only");
        assert_eq!(cursor.advance(Direction::Previous).channel.id, "only");
    }

    #[test]
    fn test_select_known_and_unknown() {
        let mut cursor = ChannelCursor::new(registry(&["A", "B", "C"]), "A");
        assert_eq!(cursor.select("C").map(|c| c.index), Some(2));
        assert_eq!(cursor.select("nope"), None);
        assert_eq!(cursor.active().id, "C");
    }

    #[test]
    fn test_apply_ignores_non_channel_actions() {
        let mut cursor = ChannelCursor::new(registry(&["A", "B"]), "A");
        for action in [ControlAction::VolumeUp, ControlAction::VolumeDown, ControlAction::Mute, ControlAction::Enter] {
            assert_eq!(cursor.apply(action), None);
        }
        assert_eq!(cursor.active().id, "A");
        assert_eq!(cursor.apply(ControlAction::ChannelDown).unwrap().channel.id, "B");
        assert_eq!(cursor.apply(ControlAction::ChannelUp).unwrap().channel.id, "A");
    }
}
