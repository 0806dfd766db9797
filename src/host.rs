//! Host page integration
//!
//! In injected mode the overlay takes over the host page: hides its UI,
//! moves its video element under the overlay and mirrors channel changes into
//! the page's navigation fragment so the host's own router switches streams.
//! In standalone mode the player is loaded into a frame by URL instead.

use log::{info, warn};

use crate::models::{ChannelRecord, ExecutionMode};

pub const PLAYER_FRAGMENT_PREFIX: &str = "#/player/";

/// Navigation fragment the host router understands, e.g. `#/player/5`
pub fn player_fragment(channel_id: &str) -> String {
    format!("{}{}", PLAYER_FRAGMENT_PREFIX, channel_id)
}

/// Frame source for the standalone player
pub fn player_url(base_url: &str, channel_id: &str) -> String {
    format!("{}{}", base_url, channel_id)
}

/// Everything the overlay is allowed to do to the host document.
pub trait HostAdapter {
    /// Hide the host's own UI and lift the overlay root above everything.
    fn suppress_host_chrome(&mut self);
    /// Move the host's video element under the overlay. False if there is none.
    fn adopt_video_element(&mut self) -> bool;
    /// Tell the host router which channel to play.
    fn publish_channel(&mut self, channel_id: &str);
}

/// Embedded player frame used outside the host page
pub trait PlayerFrame {
    fn set_source(&mut self, url: &str);
}

/// Adapter that leaves the host alone
#[derive(Debug, Default)]
pub struct NoopHost;

impl HostAdapter for NoopHost {
    fn suppress_host_chrome(&mut self) {}

    fn adopt_video_element(&mut self) -> bool {
        false
    }

    fn publish_channel(&mut self, _channel_id: &str) {}
}

/// Native preview surface. Nothing to load, the app draws the URL itself.
#[derive(Debug, Default)]
pub struct PreviewFrame;

impl PlayerFrame for PreviewFrame {
    fn set_source(&mut self, url: &str) {
        info!("[PLAY] Preview frame: {}", url);
    }
}

pub enum Integration {
    Injected(Box<dyn HostAdapter>),
    Standalone {
        frame: Box<dyn PlayerFrame>,
        player_base_url: String,
        source: Option<String>,
    },
}

impl Integration {
    pub fn injected(host: Box<dyn HostAdapter>) -> Self {
        Integration::Injected(host)
    }

    pub fn standalone(frame: Box<dyn PlayerFrame>, player_base_url: &str) -> Self {
        Integration::Standalone {
            frame,
            player_base_url: player_base_url.to_string(),
            source: None,
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        match self {
            Integration::Injected(_) => ExecutionMode::Injected,
            Integration::Standalone { .. } => ExecutionMode::Standalone,
        }
    }

    /// One-time takeover of the host page, or initial frame load.
    pub fn start(&mut self, initial: &ChannelRecord) {
        if let Integration::Injected(host) = self {
            host.suppress_host_chrome();
            if host.adopt_video_element() {
                info!("[HOST] Host video element moved under the overlay");
            } else {
                warn!("[HOST] No host video element found, overlay runs without playback");
            }
            return;
        }
        self.load_frame(initial);
    }

    pub fn on_channel_changed(&mut self, channel: &ChannelRecord) {
        if let Integration::Injected(host) = self {
            host.publish_channel(&channel.id);
            return;
        }
        self.load_frame(channel);
    }

    /// Current frame URL in standalone mode
    pub fn frame_source(&self) -> Option<&str> {
        match self {
            Integration::Standalone { source, .. } => source.as_deref(),
            Integration::Injected(_) => None,
        }
    }

    fn load_frame(&mut self, channel: &ChannelRecord) {
        if let Integration::Standalone { frame, player_base_url, source } = self {
            let url = player_url(player_base_url, &channel.id);
            frame.set_source(&url);
            *source = Some(url);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_player_fragment_format() {
        assert_eq!(player_fragment("5"), "#/player/5");
        assert_eq!(player_fragment("12"), "#/player/12");
    }

    #[test]
    fn test_player_url_concatenates() {
        assert_eq!(player_url("https://x/play/", "7"), "https://x/play/7");
    }

    #[test]
    fn test_injected_start_takes_over_host() {
        let calls = CallLog::default();
        let mut integration = Integration::injected(Box::new(RecordingHost { calls: calls.clone(), has_video: true }));
        integration.start(&ChannelRecord::new("1", "One"));
        assert_eq!(*calls.borrow(), vec![HostCall::SuppressChrome, HostCall::AdoptVideo]);
        assert_eq!(integration.mode(), ExecutionMode::Injected);
        assert_eq!(integration.frame_source(), None);
    }

    #[test]
    fn test_missing_video_is_not_fatal() {
        let calls = CallLog::default();
        let mut integration = Integration::injected(Box::new(RecordingHost { calls: calls.clone(), has_video: false }));
        integration.start(&ChannelRecord::new("1", "One"));
        integration.on_channel_changed(&ChannelRecord::new("2", "Two"));
        assert_eq!(calls.borrow().last(), Some(&HostCall::Publish("#/player/2".to_string())));
    }

    #[test]
    fn test_standalone_loads_frame_by_url() {
        let calls = CallLog::default();
        let mut integration = Integration::standalone(Box::new(RecordingFrame { calls: calls.clone() }), "https://x/play/");
        integration.start(&ChannelRecord::new("1", "One"));
        integration.on_channel_changed(&ChannelRecord::new("7", "Seven"));
        assert_eq!(
            *calls.borrow(),
            vec![
                HostCall::FrameSource("https://x/play/1".to_string()),
                HostCall::FrameSource("https://x/play/7".to_string()),
            ]
        );
        assert_eq!(integration.frame_source(), Some("https://x/play/7"));
        assert_eq!(integration.mode(), ExecutionMode::Standalone);
    }

    #[test]
    fn test_noop_host_reports_no_video() {
        let mut integration = Integration::injected(Box::new(NoopHost));
        integration.start(&ChannelRecord::new("1", "One"));
        integration.on_channel_changed(&ChannelRecord::new("2", "Two"));
        assert_eq!(integration.frame_source(), None);
    }
}
