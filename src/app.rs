//! Overlay UI
//!
//! Draws the TV-style channel overlay with egui and feeds pointer and key
//! input into the [`Overlay`] controller.

use std::time::Duration;

use egui::{Color32, RichText};

use crate::channels::ChannelRegistry;
use crate::config::AppConfig;
use crate::cursor::Direction;
use crate::guide::SetupGuide;
use crate::host::Integration;
use crate::input::{egui_key_name, SharedInbox};
use crate::overlay::Overlay;

const BACKGROUND: Color32 = Color32::from_rgb(2, 6, 23);
const ACCENT: Color32 = Color32::from_rgb(37, 99, 235);
const LIVE_RED: Color32 = Color32::from_rgb(220, 38, 38);
const INJECTED_BADGE: Color32 = Color32::from_rgb(52, 211, 153);
const STANDALONE_BADGE: Color32 = Color32::from_rgb(251, 191, 36);

/// Repaint at least this often so the clock stays current
const CLOCK_REFRESH: Duration = Duration::from_secs(1);
const FADE_SECS: f32 = 0.6;

/// Clicks on overlay buttons, applied after the frame is laid out
enum UiCommand {
    Advance(Direction),
    Select(String),
}

pub struct OverlayApp {
    overlay: Overlay,
    guide: SetupGuide,
    /// Keys captured by the page listener (browser build). Native reads egui key events instead.
    inbox: Option<SharedInbox>,
    /// Native preview has no player behind the canvas, so draw one
    preview_surface: bool,
    scrolled_to: Option<usize>,
}

impl OverlayApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &AppConfig,
        registry: ChannelRegistry,
        integration: Integration,
        inbox: Option<SharedInbox>,
        page_url: &str,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let preview_surface = cfg!(not(target_arch = "wasm32")) && !integration.mode().is_injected();
        let now = input_time(&cc.egui_ctx);
        let overlay = Overlay::new(registry, &config.default_channel_id, config.idle_timeout(), integration, now);

        Self {
            overlay,
            guide: SetupGuide::new(page_url),
            inbox,
            preview_surface,
            scrolled_to: None,
        }
    }

    fn collect_input(&mut self, ctx: &egui::Context, now: Duration) {
        let input = ctx.input(|i| FrameInput::gather(&i.events, self.inbox.as_ref()));
        input.apply(&mut self.overlay, now);
    }

    fn draw_preview(&self, ctx: &egui::Context) {
        let painter = ctx.layer_painter(egui::LayerId::background());
        let rect = ctx.screen_rect();
        painter.rect_filled(rect, 0.0, BACKGROUND);
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            format!("Player preview\n{}", self.overlay.frame_source().unwrap_or("")),
            egui::FontId::proportional(20.0),
            Color32::from_white_alpha(60),
        );
    }

    fn draw_controls(&mut self, ctx: &egui::Context, opacity: f32) -> Vec<UiCommand> {
        let mut commands = Vec::new();
        let frame = egui::Frame::new()
            .inner_margin(48.0)
            .fill(Color32::from_black_alpha(110));

        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            ui.multiply_opacity(opacity);
            self.header(ui);
            ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                self.channel_strip(ui, &mut commands);
                ui.add_space(32.0);
                self.now_playing(ui, &mut commands);
            });
        });

        commands
    }

    fn header(&self, ui: &mut egui::Ui) {
        let mode = self.overlay.mode();
        ui.horizontal(|ui| {
            egui::Frame::new()
                .fill(ACCENT)
                .corner_radius(24.0)
                .inner_margin(egui::Margin::symmetric(32, 12))
                .show(ui, |ui| {
                    ui.label(RichText::new("EON").size(48.0).strong().italics().color(Color32::WHITE));
                });
            ui.add_space(24.0);
            ui.vertical(|ui| {
                let badge = if mode.is_injected() { INJECTED_BADGE } else { STANDALONE_BADGE };
                ui.label(RichText::new(format!("● {}", mode.label().to_uppercase())).size(14.0).strong().color(badge));
                if !mode.is_injected() {
                    ui.label(RichText::new("Press 'S' for Guide").size(18.0).weak());
                }
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                let clock = chrono::Local::now().format("%H:%M").to_string();
                ui.label(RichText::new(clock).size(72.0).color(Color32::from_white_alpha(230)));
            });
        });
    }

    fn now_playing(&self, ui: &mut egui::Ui, commands: &mut Vec<UiCommand>) {
        let channel = self.overlay.active_channel();
        ui.horizontal(|ui| {
            egui::Frame::new()
                .fill(Color32::from_white_alpha(12))
                .corner_radius(40.0)
                .inner_margin(32.0)
                .show(ui, |ui| {
                    ui.set_min_size(egui::vec2(140.0, 140.0));
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new(&channel.id).size(96.0).strong().color(Color32::WHITE));
                    });
                });
            ui.add_space(32.0);
            ui.vertical(|ui| {
                ui.label(RichText::new(&channel.name).size(96.0).strong().color(Color32::WHITE));
                ui.horizontal(|ui| {
                    egui::Frame::new()
                        .fill(LIVE_RED)
                        .corner_radius(12.0)
                        .inner_margin(egui::Margin::symmetric(16, 6))
                        .show(ui, |ui| {
                            ui.label(RichText::new("● NOW STREAMING").size(16.0).strong().color(Color32::WHITE));
                        });
                    ui.add_space(16.0);
                    ui.label(RichText::new("Interactive TV Interface").size(28.0).italics().weak());
                });
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let size = egui::vec2(110.0, 110.0);
                if ui.add(egui::Button::new(RichText::new("▼").size(48.0)).min_size(size)).clicked() {
                    commands.push(UiCommand::Advance(Direction::Previous));
                }
                if ui.add(egui::Button::new(RichText::new("▲").size(48.0)).min_size(size)).clicked() {
                    commands.push(UiCommand::Advance(Direction::Next));
                }
            });
        });
    }

    fn channel_strip(&mut self, ui: &mut egui::Ui, commands: &mut Vec<UiCommand>) {
        let active_index = self.overlay.channels().position(&self.overlay.active_channel().id);
        let scroll_needed = active_index != self.scrolled_to;

        egui::ScrollArea::horizontal().id_salt("channel_strip").show(ui, |ui| {
            ui.horizontal(|ui| {
                for (index, channel) in self.overlay.channels().iter().enumerate() {
                    let is_active = Some(index) == active_index;
                    let text = RichText::new(format!("CH {}\n{}", channel.id, channel.name)).size(26.0).strong();
                    let fill = if is_active { ACCENT } else { Color32::from_white_alpha(12) };
                    let response = ui.add(
                        egui::Button::new(text)
                            .min_size(egui::vec2(260.0, 110.0))
                            .fill(fill)
                            .selected(is_active),
                    );
                    if is_active && scroll_needed {
                        response.scroll_to_me(Some(egui::Align::Center));
                    }
                    if response.clicked() {
                        commands.push(UiCommand::Select(channel.id.clone()));
                    }
                }
            });
        });

        self.scrolled_to = active_index;
    }

    fn apply(&mut self, commands: Vec<UiCommand>, now: Duration) {
        for command in commands {
            match command {
                UiCommand::Advance(direction) => self.overlay.advance(direction, now),
                UiCommand::Select(id) => {
                    self.overlay.select(&id, now);
                }
            }
        }
    }
}

impl eframe::App for OverlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = input_time(ctx);
        self.collect_input(ctx, now);
        self.overlay.tick(now);

        if self.preview_surface {
            self.draw_preview(ctx);
        }
        if self.overlay.mode().is_injected() {
            ctx.set_cursor_icon(egui::CursorIcon::None);
        }

        let visible = self.overlay.visibility().overlay_visible();
        let opacity = ctx.animate_bool_with_time(egui::Id::new("overlay_fade"), visible, FADE_SECS);
        if opacity > 0.0 {
            let commands = self.draw_controls(ctx, opacity);
            self.apply(commands, now);
        }

        if self.overlay.visibility().guide_visible() && self.guide.show(ctx).close_requested {
            self.overlay.close_guide(now);
        }

        ctx.request_repaint_after(next_wake(self.overlay.time_until_deadline(now)));
    }

    /// Transparent over the host video or the player frame
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        if self.preview_surface {
            BACKGROUND.to_normalized_gamma_f32()
        } else {
            [0.0, 0.0, 0.0, 0.0]
        }
    }
}

/// Input gathered for one frame
#[derive(Debug, Default, PartialEq)]
struct FrameInput {
    keys: Vec<String>,
    pointer_activity: bool,
}

impl FrameInput {
    /// With an inbox the page listener owns the keyboard and egui key events are
    /// skipped, so each remote press is handled once.
    fn gather(events: &[egui::Event], inbox: Option<&SharedInbox>) -> Self {
        let mut input = Self::default();
        for event in events {
            match event {
                egui::Event::Key { key, pressed: true, .. } if inbox.is_none() => {
                    if let Some(name) = egui_key_name(*key) {
                        input.keys.push(name.to_string());
                    }
                }
                egui::Event::PointerMoved(_) | egui::Event::PointerButton { pressed: true, .. } => {
                    input.pointer_activity = true;
                }
                _ => {}
            }
        }
        if let Some(inbox) = inbox {
            input.keys.extend(inbox.borrow_mut().drain());
        }
        input
    }

    fn apply(self, overlay: &mut Overlay, now: Duration) {
        if self.pointer_activity {
            overlay.activity(now);
        }
        for key in self.keys {
            overlay.handle_key(&key, now);
        }
    }
}

/// Wake for the idle deadline, or for the clock if that comes first
fn next_wake(until_deadline: Option<Duration>) -> Duration {
    until_deadline.map_or(CLOCK_REFRESH, |remaining| remaining.min(CLOCK_REFRESH))
}

/// egui's input clock, used as the idle timer's time base
fn input_time(ctx: &egui::Context) -> Duration {
    Duration::from_secs_f64(ctx.input(|i| i.time).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::{CallLog, HostCall, RecordingHost};
    use crate::input::InputInbox;
    use crate::models::ChannelRecord;
    use crate::visibility::OverlayState;

    fn key(key: egui::Key) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn click() -> egui::Event {
        egui::Event::PointerButton {
            pos: egui::pos2(10.0, 10.0),
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn overlay(calls: &CallLog) -> Overlay {
        let registry = ChannelRegistry::new(vec![
            ChannelRecord::new("1", "One"),
            ChannelRecord::new("2", "Two"),
            ChannelRecord::new("3", "Three"),
        ])
        .unwrap();
        let host = RecordingHost { calls: calls.clone(), has_video: true };
        Overlay::new(registry, "1", Duration::from_secs(8), Integration::injected(Box::new(host)), Duration::ZERO)
    }

    #[test]
    fn test_egui_keys_used_without_inbox() {
        let input = FrameInput::gather(&[key(egui::Key::ArrowUp), key(egui::Key::A)], None);
        assert_eq!(input.keys, vec!["ArrowUp".to_string()]);
        assert!(!input.pointer_activity);
    }

    #[test]
    fn test_inbox_keys_replace_egui_keys() {
        let inbox = InputInbox::shared();
        inbox.borrow_mut().push("ArrowUp");
        // Canvas has focus: eframe reports the same press as an egui event
        let input = FrameInput::gather(&[key(egui::Key::ArrowUp)], Some(&inbox));
        assert_eq!(input.keys, vec!["ArrowUp".to_string()]);
        assert!(inbox.borrow().is_empty());
    }

    #[test]
    fn test_pointer_events_count_as_activity() {
        let moved = FrameInput::gather(&[egui::Event::PointerMoved(egui::pos2(1.0, 2.0))], None);
        assert!(moved.pointer_activity);
        assert!(FrameInput::gather(&[click()], None).pointer_activity);
        assert!(!FrameInput::gather(&[], None).pointer_activity);
    }

    #[test]
    fn test_remote_key_after_click_changes_channel() {
        let calls = CallLog::default();
        let mut overlay = overlay(&calls);
        let inbox = InputInbox::shared();

        FrameInput::gather(&[click()], Some(&inbox)).apply(&mut overlay, Duration::from_secs(1));
        inbox.borrow_mut().push("ArrowUp");
        FrameInput::gather(&[key(egui::Key::ArrowUp)], Some(&inbox)).apply(&mut overlay, Duration::from_secs(2));

        assert_eq!(overlay.active_channel().id, "2");
        assert_eq!(calls.borrow().last(), Some(&HostCall::Publish("#/player/2".to_string())));
    }

    #[test]
    fn test_pointer_activity_reshows_hidden_overlay() {
        let calls = CallLog::default();
        let mut overlay = overlay(&calls);
        assert!(overlay.tick(Duration::from_secs(8)));
        assert_eq!(overlay.state(), OverlayState::Hidden);

        FrameInput::gather(&[click()], None).apply(&mut overlay, Duration::from_secs(9));
        assert_eq!(overlay.state(), OverlayState::Visible);
    }

    #[test]
    fn test_next_wake() {
        assert_eq!(next_wake(None), CLOCK_REFRESH);
        assert_eq!(next_wake(Some(Duration::from_millis(250))), Duration::from_millis(250));
        assert_eq!(next_wake(Some(Duration::from_secs(5))), CLOCK_REFRESH);
        assert_eq!(next_wake(Some(Duration::ZERO)), Duration::ZERO);
    }
}
