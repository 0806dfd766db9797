//! EON TV Overlay
//! Remote-control channel overlay for the eon.tv web player

pub mod app;
pub mod channels;
pub mod config;
pub mod cursor;
pub mod error;
pub mod guide;
pub mod host;
pub mod input;
pub mod logging;
pub mod models;
pub mod overlay;
pub mod visibility;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
mod web;

pub use app::OverlayApp;
pub use config::AppConfig;
pub use error::ConfigError;
pub use models::{ChannelRecord, ControlAction, ExecutionMode};
