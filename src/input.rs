//! Remote control key mapping
//!
//! TV remotes from different vendors report the same button under different
//! key names. Everything funnels into one of a handful of actions here.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::models::ControlAction;

const UP_KEYS: &[&str] = &["ArrowUp", "ChannelUp", "PageUp", "UI_KEY_UP"];
const DOWN_KEYS: &[&str] = &["ArrowDown", "ChannelDown", "PageDown", "UI_KEY_DOWN"];
const BACK_KEYS: &[&str] = &["Escape", "Back", "BrowserBack", "XF86Back"];
const SELECT_KEYS: &[&str] = &["Enter", "Unidentified", "OK", " "];
const GUIDE_KEYS: &[&str] = &["s", "S"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ChannelUp,
    ChannelDown,
    /// Closes the guide if it is open, otherwise shows/hides the overlay
    DismissOrToggleOverlay,
    ToggleGuide,
    /// Keeps the overlay on screen
    Activity,
    None,
}

impl KeyAction {
    /// Navigation keys must not scroll the host page.
    pub fn prevents_default(&self) -> bool {
        matches!(
            self,
            KeyAction::ChannelUp | KeyAction::ChannelDown | KeyAction::DismissOrToggleOverlay
        )
    }

    pub fn control_action(&self) -> Option<ControlAction> {
        match self {
            KeyAction::ChannelUp => Some(ControlAction::ChannelUp),
            KeyAction::ChannelDown => Some(ControlAction::ChannelDown),
            _ => None,
        }
    }
}

/// Result of classifying one key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOutcome {
    pub action: KeyAction,
    pub prevent_default: bool,
}

pub fn classify(key: &str) -> KeyAction {
    if UP_KEYS.contains(&key) {
        KeyAction::ChannelUp
    } else if DOWN_KEYS.contains(&key) {
        KeyAction::ChannelDown
    } else if BACK_KEYS.contains(&key) {
        KeyAction::DismissOrToggleOverlay
    } else if SELECT_KEYS.contains(&key) {
        KeyAction::Activity
    } else if GUIDE_KEYS.contains(&key) {
        KeyAction::ToggleGuide
    } else {
        KeyAction::None
    }
}

pub fn map_key(key: &str) -> KeyOutcome {
    let action = classify(key);
    KeyOutcome {
        action,
        prevent_default: action.prevents_default(),
    }
}

/// Browser key name for an egui key, for the native preview
pub fn egui_key_name(key: egui::Key) -> Option<&'static str> {
    use egui::Key;

    let name = match key {
        Key::ArrowUp => "ArrowUp",
        Key::ArrowDown => "ArrowDown",
        Key::PageUp => "PageUp",
        Key::PageDown => "PageDown",
        Key::Escape => "Escape",
        Key::Enter => "Enter",
        Key::Space => " ",
        Key::S => "s",
        _ => return None,
    };
    Some(name)
}

/// Raw key names captured by the page-level key listener, waiting for the next frame
#[derive(Default)]
pub struct InputInbox {
    keys: VecDeque<String>,
    ctx: Option<egui::Context>,
}

pub type SharedInbox = Rc<RefCell<InputInbox>>;

impl InputInbox {
    pub fn shared() -> SharedInbox {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Context to wake when a key arrives
    pub fn set_context(&mut self, ctx: egui::Context) {
        self.ctx = Some(ctx);
    }

    pub fn push(&mut self, key: &str) {
        self.keys.push_back(key.to_string());
        if let Some(ctx) = &self.ctx {
            ctx.request_repaint();
        }
    }

    pub fn drain(&mut self) -> Vec<String> {
        self.keys.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
