//! Overlay controller: input in, channel and visibility state out
//!
//! Owns the cursor, the visibility state machine and the host integration,
//! and keeps them in step. No rendering here.

use std::time::Duration;

use log::{debug, info};

use crate::channels::ChannelRegistry;
use crate::cursor::{ChannelChange, ChannelCursor, Direction};
use crate::host::Integration;
use crate::input::{map_key, KeyAction, KeyOutcome};
use crate::models::{ChannelRecord, ExecutionMode};
use crate::visibility::{OverlayState, VisibilityController};

pub struct Overlay {
    cursor: ChannelCursor,
    visibility: VisibilityController,
    integration: Integration,
}

impl Overlay {
    /// Builds the controller and runs the one-time host takeover.
    pub fn new(
        registry: ChannelRegistry,
        default_channel_id: &str,
        idle_timeout: Duration,
        mut integration: Integration,
        now: Duration,
    ) -> Self {
        let cursor = ChannelCursor::new(registry, default_channel_id);
        info!(
            "[INIT] Starting in {:?} mode on channel {} ({})",
            integration.mode(),
            cursor.active().id,
            cursor.active().name
        );
        integration.start(cursor.active());

        Self {
            cursor,
            visibility: VisibilityController::new(idle_timeout, now),
            integration,
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.integration.mode()
    }

    pub fn active_channel(&self) -> &ChannelRecord {
        self.cursor.active()
    }

    pub fn channels(&self) -> &ChannelRegistry {
        self.cursor.registry()
    }

    pub fn visibility(&self) -> &VisibilityController {
        &self.visibility
    }

    pub fn state(&self) -> OverlayState {
        self.visibility.state()
    }

    pub fn frame_source(&self) -> Option<&str> {
        self.integration.frame_source()
    }

    /// Classify a raw key name and act on it.
    pub fn handle_key(&mut self, key: &str, now: Duration) -> KeyOutcome {
        let outcome = map_key(key);
        if outcome.action != KeyAction::None {
            debug!("[KEY] {:?} -> {:?}", key, outcome.action);
        }
        self.handle_action(outcome.action, now);
        outcome
    }

    pub fn handle_action(&mut self, action: KeyAction, now: Duration) {
        match action {
            KeyAction::ChannelUp => self.advance(Direction::Next, now),
            KeyAction::ChannelDown => self.advance(Direction::Previous, now),
            KeyAction::DismissOrToggleOverlay => self.visibility.dismiss(now),
            KeyAction::ToggleGuide => self.visibility.toggle_guide(now),
            KeyAction::Activity => self.visibility.activity(now),
            KeyAction::None => {}
        }
    }

    pub fn advance(&mut self, direction: Direction, now: Duration) {
        self.visibility.activity(now);
        let change = self.cursor.advance(direction);
        self.publish(change);
    }

    /// Direct pick from the channel strip. Unknown ids change nothing.
    pub fn select(&mut self, channel_id: &str, now: Duration) -> bool {
        self.visibility.activity(now);
        match self.cursor.select(channel_id) {
            Some(change) => {
                self.publish(change);
                true
            }
            None => false,
        }
    }

    /// Pointer movement or click anywhere on the overlay
    pub fn activity(&mut self, now: Duration) {
        self.visibility.activity(now);
    }

    /// Guide's close button
    pub fn close_guide(&mut self, now: Duration) {
        self.visibility.close_guide(now);
    }

    /// Fire the idle timer if due. True if the overlay was hidden.
    pub fn tick(&mut self, now: Duration) -> bool {
        self.visibility.tick(now)
    }

    pub fn time_until_deadline(&self, now: Duration) -> Option<Duration> {
        self.visibility.time_until_deadline(now)
    }

    fn publish(&mut self, change: ChannelChange) {
        info!("[CH] {} - {}", change.channel.id, change.channel.name);
        self.integration.on_channel_changed(&change.channel);
    }
}

#[cfg(test)]
#[path = "overlay_tests.rs"]
mod tests;
