//! Browser entry point (wasm32 only)

use log::{error, info};
use wasm_bindgen::prelude::*;

use crate::app::OverlayApp;
use crate::config::AppConfig;
use crate::dom::{self, DomFrame, DomHost};
use crate::host::Integration;
use crate::input::InputInbox;
use crate::logging;
use crate::models::ExecutionMode;

/// Global the loader page can set to override the built-in configuration
const CONFIG_GLOBAL: &str = "EON_TV_CONFIG";

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let config = match page_config() {
        Some(json) => AppConfig::from_json(&json),
        None => Ok(AppConfig::default()),
    };
    match config {
        Ok(config) => launch(config),
        Err(e) => {
            init_logging(log::LevelFilter::Info);
            error!("[INIT] {}", e);
        }
    }
}

fn page_config() -> Option<String> {
    let window = dom::window().ok()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).ok()?;
    if let Some(json) = value.as_string() {
        return Some(json);
    }
    if value.is_undefined() || value.is_null() {
        return None;
    }
    js_sys::JSON::stringify(&value).ok().and_then(|s| s.as_string())
}

fn init_logging(level: log::LevelFilter) {
    if let Err(e) = logging::init(level) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("[INIT] Logger not installed: {}", e)));
    }
}

fn launch(config: AppConfig) {
    init_logging(config.log_level());

    // No channels means nothing to show; stop before touching the host page
    let registry = match config.registry() {
        Ok(registry) => registry,
        Err(e) => {
            error!("[INIT] {}", e);
            return;
        }
    };

    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = run(config, registry).await {
            error!("[INIT] Failed to start overlay: {:?}", e);
        }
    });
}

async fn run(config: AppConfig, registry: crate::channels::ChannelRegistry) -> Result<(), JsValue> {
    let window = dom::window()?;
    let document = dom::document()?;
    let mode = dom::detect_mode(&config.host_domain);
    info!("[INIT] {} ({:?})", mode.label(), mode);

    let (root, canvas) = dom::mount_overlay_root(&document, &config.overlay_root_id)?;
    let integration = match mode {
        ExecutionMode::Injected => Integration::injected(Box::new(DomHost::new(
            document.clone(),
            root.clone(),
            &config.overlay_root_id,
            &config.video_selector,
        ))),
        ExecutionMode::Standalone => {
            Integration::standalone(Box::new(DomFrame::mount(&document, &root)?), &config.player_base_url)
        }
    };

    let inbox = InputInbox::shared();
    dom::install_key_listener(&window, inbox.clone())?;
    let page_url = dom::page_url();

    eframe::WebRunner::new()
        .start(
            canvas,
            web_options(),
            Box::new(move |cc| {
                inbox.borrow_mut().set_context(cc.egui_ctx.clone());
                Ok(Box::new(OverlayApp::new(cc, &config, registry, integration, Some(inbox), &page_url)))
            }),
        )
        .await
}

/// Remote keys are read from the page listener, so the canvas must not swallow them
fn web_options() -> eframe::WebOptions {
    eframe::WebOptions {
        should_stop_propagation: Box::new(|_| false),
        ..Default::default()
    }
}
