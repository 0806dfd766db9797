//! Browser DOM side of the host integration (wasm32 only)

use log::error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, HtmlElement, HtmlIFrameElement, KeyboardEvent, Window};

use crate::host::{player_fragment, HostAdapter, PlayerFrame};
use crate::input::{map_key, KeyAction, SharedInbox};
use crate::models::ExecutionMode;

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?.document().ok_or_else(|| JsValue::from_str("no document"))
}

/// Injected when we are the top frame on the host domain
pub fn detect_mode(host_domain: &str) -> ExecutionMode {
    let Ok(window) = window() else {
        return ExecutionMode::Standalone;
    };
    let hostname = window.location().hostname().unwrap_or_default();
    let is_top_frame = matches!(window.top(), Ok(Some(top)) if top == window);
    ExecutionMode::detect(&hostname, is_top_frame, host_domain)
}

pub fn page_url() -> String {
    window().and_then(|w| w.location().href()).unwrap_or_default()
}

fn style(el: &web_sys::Element, css: &str) -> Result<(), JsValue> {
    el.set_attribute("style", css)
}

/// Create the overlay root and the canvas egui draws on.
pub fn mount_overlay_root(document: &Document, root_id: &str) -> Result<(HtmlElement, HtmlCanvasElement), JsValue> {
    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let root: HtmlElement = document.create_element("div")?.unchecked_into();
    root.set_id(root_id);
    style(&root, "position: fixed; inset: 0; width: 100vw; height: 100vh; overflow: hidden; background: #020617;")?;

    let canvas: HtmlCanvasElement = document.create_element("canvas")?.unchecked_into();
    style(&canvas, "position: absolute; inset: 0; width: 100%; height: 100%; z-index: 1; background: transparent;")?;

    root.append_child(&canvas)?;
    body.append_child(&root)?;
    Ok((root, canvas))
}

/// Takes over the host page we were injected into
pub struct DomHost {
    document: Document,
    root: HtmlElement,
    root_id: String,
    video_selector: String,
}

impl DomHost {
    pub fn new(document: Document, root: HtmlElement, root_id: &str, video_selector: &str) -> Self {
        Self {
            document,
            root,
            root_id: root_id.to_string(),
            video_selector: video_selector.to_string(),
        }
    }

    fn host_style_override(&self) -> String {
        format!(
            "body > *:not(#{id}) {{ display: none !important; }}\n\
             #{id} {{ display: block !important; position: fixed; inset: 0; z-index: 2147483647; background: #020617; }}\n\
             video {{ object-fit: contain !important; background: black !important; }}",
            id = self.root_id
        )
    }

    fn try_suppress(&self) -> Result<(), JsValue> {
        let head = self.document.head().ok_or_else(|| JsValue::from_str("no head"))?;
        let sheet = self.document.create_element("style")?;
        sheet.set_text_content(Some(&self.host_style_override()));
        head.append_child(&sheet)?;
        Ok(())
    }

    fn try_adopt(&self) -> Result<bool, JsValue> {
        let Some(video) = self.document.query_selector(&self.video_selector)? else {
            return Ok(false);
        };
        let video: HtmlElement = video.dyn_into()?;
        let css = video.style();
        css.set_property("position", "absolute")?;
        css.set_property("inset", "0")?;
        css.set_property("width", "100%")?;
        css.set_property("height", "100%")?;
        css.set_property("z-index", "0")?;
        css.set_property("object-fit", "contain")?;
        css.set_property("background", "black")?;
        // insert_before moves the node, the host's playback session keeps running
        self.root.insert_before(&video, self.root.first_child().as_ref())?;
        Ok(true)
    }
}

impl HostAdapter for DomHost {
    fn suppress_host_chrome(&mut self) {
        if let Err(e) = self.try_suppress() {
            error!("[HOST] Failed to install style override: {:?}", e);
        }
    }

    fn adopt_video_element(&mut self) -> bool {
        match self.try_adopt() {
            Ok(found) => found,
            Err(e) => {
                error!("[HOST] Failed to move host video: {:?}", e);
                false
            }
        }
    }

    fn publish_channel(&mut self, channel_id: &str) {
        let fragment = player_fragment(channel_id);
        let result = window().and_then(|w| w.location().set_hash(&fragment));
        if let Err(e) = result {
            error!("[HOST] Failed to set location hash {}: {:?}", fragment, e);
        }
    }
}

/// Sandboxed player frame for standalone mode
pub struct DomFrame {
    iframe: HtmlIFrameElement,
}

impl DomFrame {
    pub fn mount(document: &Document, root: &HtmlElement) -> Result<Self, JsValue> {
        let iframe: HtmlIFrameElement = document.create_element("iframe")?.unchecked_into();
        iframe.set_title("EON Player");
        iframe.set_attribute("allow", "autoplay; fullscreen; encrypted-media")?;
        iframe.set_attribute("sandbox", "allow-forms allow-scripts allow-same-origin")?;
        style(
            &iframe,
            "position: absolute; inset: 0; width: 100%; height: 100%; border: none; z-index: 0; pointer-events: none;",
        )?;
        root.insert_before(&iframe, root.first_child().as_ref())?;
        Ok(Self { iframe })
    }
}

impl PlayerFrame for DomFrame {
    fn set_source(&mut self, url: &str) {
        self.iframe.set_src(url);
    }
}

/// Page-level keydown listener. Remote keys reach the window even when the
/// canvas has no focus, and navigation keys must not scroll the page.
///
/// Registered for the capture phase so it runs before any target handler,
/// including eframe's canvas listener, can stop the event.
pub fn install_key_listener(window: &Window, inbox: SharedInbox) -> Result<(), JsValue> {
    let listener = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        let key = event.key();
        let outcome = map_key(&key);
        if outcome.prevent_default {
            event.prevent_default();
        }
        if outcome.action != KeyAction::None {
            inbox.borrow_mut().push(&key);
        }
    });
    window.add_event_listener_with_callback_and_bool("keydown", listener.as_ref().unchecked_ref(), true)?;
    // Lives for the whole session
    listener.forget();
    Ok(())
}

