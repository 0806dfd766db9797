//! Setup guide shown on top of the overlay
//!
//! Explains how to get the overlay onto a TV: host the build, open eon.tv,
//! add the bookmarklet, run it. Only talks to the rest of the app through
//! the close request it returns.

use egui::{Color32, RichText};

/// Script loaded by the bookmarklet, relative to the hosting origin. Lives in `web/`.
pub const LOADER_SCRIPT_PATH: &str = "/bootstrap.js";

const ACCENT: Color32 = Color32::from_rgb(96, 165, 250);
const PANEL: Color32 = Color32::from_rgb(15, 23, 42);

const STEPS: [(&str, &str); 4] = [
    ("Host It", "Upload this build to any public static host so your TV can reach it."),
    ("TV Browser", "Open your TV browser, go to eon.tv and log in so the video player loads."),
    ("Injection", "Create a bookmark on your TV with the script below as its URL. Name it \"EON UI\"."),
    ("Launch", "While on the eon.tv player page, open your bookmarks and pick \"EON UI\"."),
];

const LEGEND: [(&str, &str); 4] = [
    ("UP / DOWN", "Change Channels"),
    ("ENTER / OK", "Show/Hide UI"),
    ("BACK / ESC", "Dismiss Menus"),
    ("CHANNEL +/-", "Fast Switching"),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GuideResponse {
    pub close_requested: bool,
}

pub struct SetupGuide {
    page_url: String,
    script: String,
    copied: bool,
}

impl SetupGuide {
    pub fn new(page_url: &str) -> Self {
        Self {
            page_url: page_url.to_string(),
            script: injection_script(page_origin(page_url)),
            copied: false,
        }
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn show(&mut self, ctx: &egui::Context) -> GuideResponse {
        let mut response = GuideResponse::default();
        let width = (ctx.screen_rect().width() * 0.85).max(480.0);

        egui::Window::new("TV Deployment Guide")
            .collapsible(false)
            .resizable(false)
            .title_bar(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([width, 0.0])
            .frame(egui::Frame::window(&ctx.style()).fill(PANEL))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new("TV Deployment Guide").size(40.0).strong().color(Color32::WHITE));
                        ui.label(
                            RichText::new("Follow these 4 steps to get the app running on your TV remote.")
                                .size(18.0)
                                .weak(),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                        if ui.button(RichText::new("✕").size(28.0)).clicked() {
                            response.close_requested = true;
                        }
                    });
                });

                ui.add_space(16.0);
                ui.columns(STEPS.len(), |cols| {
                    for (i, (col, (title, text))) in cols.iter_mut().zip(STEPS.iter()).enumerate() {
                        col.label(RichText::new(format!("{}", i + 1)).size(28.0).strong().color(ACCENT));
                        col.label(RichText::new(*title).size(22.0).strong().color(ACCENT));
                        col.label(RichText::new(*text).size(15.0));
                        if i == 2 {
                            let label = if self.copied { "COPIED" } else { "COPY SCRIPT" };
                            if col.button(RichText::new(label).strong()).clicked() {
                                col.ctx().copy_text(self.script.clone());
                                self.copied = true;
                            }
                        }
                    }
                });

                ui.add_space(16.0);
                ui.separator();
                ui.label(RichText::new("Remote Control Legend").size(24.0).strong());
                egui::Grid::new("remote_legend").num_columns(2).spacing([40.0, 8.0]).show(ui, |ui| {
                    for (key, action) in LEGEND {
                        ui.label(RichText::new(key).size(18.0).strong().color(ACCENT));
                        ui.label(RichText::new(action).size(16.0).weak());
                        ui.end_row();
                    }
                });

                ui.add_space(12.0);
                ui.label(RichText::new(format!("Host: {}", self.page_url)).small().weak());
            });

        response
    }
}

/// Scheme and authority of a URL, e.g. `https://tv.example.com` for `https://tv.example.com/app?x=1`
pub fn page_origin(url: &str) -> &str {
    let Some(scheme_end) = url.find("://") else {
        return url.trim_end_matches('/');
    };
    let rest = &url[scheme_end + 3..];
    match rest.find(|c: char| c == '/' || c == '?' || c == '#') {
        Some(end) => &url[..scheme_end + 3 + end],
        None => url,
    }
}

/// Bookmarklet that loads the overlay into the current page
pub fn injection_script(origin: &str) -> String {
    format!(
        "javascript:(function(){{const s=document.createElement('script');s.src='{}{}';s.type='module';document.head.appendChild(s);}})();",
        origin, LOADER_SCRIPT_PATH
    )
}
