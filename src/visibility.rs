//! Overlay visibility state machine
//!
//! The overlay is shown on any activity and hidden again once the idle timer
//! runs out, unless the guide is open. Timestamps are plain `Duration`s since
//! an arbitrary epoch supplied by the caller; the app feeds it egui's input
//! clock and tests feed it whatever they like.

use std::time::Duration;

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Hidden,
    Visible,
    VisibleWithGuide,
}

/// Single cancelable deadline. Arming replaces any pending deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdleTimer {
    timeout: Duration,
    deadline: Option<Duration>,
}

impl IdleTimer {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout, deadline: None }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn arm(&mut self, now: Duration) {
        self.deadline = Some(now + self.timeout);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Time left before the deadline, zero if already due
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_sub(now))
    }

    /// Returns true exactly once when the deadline has passed.
    pub fn take_due(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Plain snapshot of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityState {
    pub overlay_visible: bool,
    pub guide_visible: bool,
    pub idle_deadline: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct VisibilityController {
    overlay_visible: bool,
    guide_visible: bool,
    timer: IdleTimer,
}

impl VisibilityController {
    /// Starts `Visible` with the idle timer armed.
    pub fn new(idle_timeout: Duration, now: Duration) -> Self {
        let mut timer = IdleTimer::new(idle_timeout);
        timer.arm(now);
        Self {
            overlay_visible: true,
            guide_visible: false,
            timer,
        }
    }

    pub fn state(&self) -> OverlayState {
        if self.guide_visible {
            OverlayState::VisibleWithGuide
        } else if self.overlay_visible {
            OverlayState::Visible
        } else {
            OverlayState::Hidden
        }
    }

    pub fn snapshot(&self) -> VisibilityState {
        VisibilityState {
            overlay_visible: self.overlay_visible(),
            guide_visible: self.guide_visible,
            idle_deadline: self.timer.deadline(),
        }
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible || self.guide_visible
    }

    pub fn guide_visible(&self) -> bool {
        self.guide_visible
    }

    pub fn timer(&self) -> &IdleTimer {
        &self.timer
    }

    /// Pointer movement, clicks, select keys and channel changes.
    pub fn activity(&mut self, now: Duration) {
        self.overlay_visible = true;
        self.timer.arm(now);
    }

    /// Fires the idle timer if it is due. Returns true if that hid the overlay.
    pub fn tick(&mut self, now: Duration) -> bool {
        if !self.timer.take_due(now) {
            return false;
        }
        if self.guide_visible || !self.overlay_visible {
            return false;
        }
        self.overlay_visible = false;
        true
    }

    pub fn toggle_guide(&mut self, now: Duration) {
        if self.guide_visible {
            self.close_guide(now);
        } else {
            self.guide_visible = true;
            self.overlay_visible = true;
        }
    }

    /// Back key: closes the guide if open, otherwise flips the overlay.
    pub fn dismiss(&mut self, now: Duration) {
        if self.guide_visible {
            self.close_guide(now);
        } else {
            self.overlay_visible = !self.overlay_visible;
        }
    }

    /// Guide closed; the overlay stays up and starts counting down again.
    pub fn close_guide(&mut self, now: Duration) {
        if !self.guide_visible {
            return;
        }
        self.guide_visible = false;
        self.overlay_visible = true;
        self.timer.arm(now);
    }

    /// How long until the idle timer is due, for scheduling the next repaint
    pub fn time_until_deadline(&self, now: Duration) -> Option<Duration> {
        self.timer.remaining(now)
    }
}

#[cfg(test)]
#[path = "visibility_tests.rs"]
mod tests;
