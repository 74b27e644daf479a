//! Preview video playback.
//!
//! ## Overview
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  MediaController: owns the captured videos                     │
//! │  ├── on_click        paused → try_play, playing → pause        │
//! │  ├── on_double_click first available fullscreen API            │
//! │  ├── on_pointer_enter paused → try_play   (hover devices only) │
//! │  └── on_pointer_leave playing → pause     (hover devices only) │
//! │                                                                │
//! │  PlaybackCoordinator: subscribed to PlaybackStarted            │
//! │  └── pauses every other playing video                          │
//! └────────────────────────────────────────────────────────────────┘
//! ```

mod coordinator;
mod playback;

use std::fmt;

use tracing::{debug, trace};

pub use coordinator::{
    playback_channel, PlaybackCoordinator, PlaybackReceiver, PlaybackSender, PlaybackStarted,
};
pub use playback::{try_play, PlayOutcome};

use crate::capabilities::Capabilities;
use crate::config::MediaConfig;
use crate::host::{FullscreenApi, MediaElement};

/// Position of a video in the captured set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VideoId(pub usize);

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "video#{}", self.0)
    }
}

/// What a click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The video was paused; the play-request protocol ran
    Play(PlayOutcome),
    /// The video was playing and is now paused
    Paused,
    /// No such video
    Ignored,
}

/// What a double-click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenOutcome {
    Requested(FullscreenApi),
    /// The platform refused; nothing is shown to the user
    Failed(FullscreenApi),
    /// No fullscreen API on this element
    Unsupported,
}

/// Applies playback policy to a fixed set of videos.
pub struct MediaController<V> {
    videos: Vec<V>,
    hover_autoplay: bool,
    fullscreen: bool,
}

impl<V: MediaElement> MediaController<V> {
    /// Take ownership of the videos and apply autoplay-safe defaults to each.
    pub fn new(videos: Vec<V>, config: &MediaConfig, caps: &Capabilities) -> Self {
        for video in &videos {
            video.set_preload(&config.preload);
            video.set_plays_inline(true);
            video.set_muted(true);
        }
        debug!(
            videos = videos.len(),
            hover_autoplay = caps.hover_autoplay(),
            "Media controller ready"
        );
        Self {
            videos,
            hover_autoplay: caps.hover_autoplay(),
            fullscreen: caps.fullscreen,
        }
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = VideoId> {
        (0..self.videos.len()).map(VideoId)
    }

    pub fn video(&self, id: VideoId) -> Option<&V> {
        self.videos.get(id.0)
    }

    /// Whether hover listeners should be attached at all.
    pub fn hover_enabled(&self) -> bool {
        self.hover_autoplay
    }

    /// Number of videos the media engine reports as playing.
    pub fn playing_count(&self) -> usize {
        self.videos.iter().filter(|v| !v.is_paused()).count()
    }

    /// Toggle playback.
    pub async fn on_click(&self, id: VideoId) -> ClickOutcome {
        let Some(video) = self.video(id) else {
            return ClickOutcome::Ignored;
        };
        if video.is_paused() {
            let outcome = try_play(video).await;
            if outcome.is_playing() {
                trace!(%id, ?outcome, "Click play");
            }
            ClickOutcome::Play(outcome)
        } else {
            video.pause();
            trace!(%id, "Click pause");
            ClickOutcome::Paused
        }
    }

    /// Request fullscreen through the first API the element exposes.
    ///
    /// The caller is responsible for suppressing the default double-click action.
    pub fn on_double_click(&self, id: VideoId) -> FullscreenOutcome {
        let Some(video) = self.video(id) else {
            return FullscreenOutcome::Unsupported;
        };
        if !self.fullscreen {
            return FullscreenOutcome::Unsupported;
        }
        let Some(api) = FullscreenApi::ALL
            .into_iter()
            .find(|api| video.supports_fullscreen(*api))
        else {
            return FullscreenOutcome::Unsupported;
        };
        match video.request_fullscreen(api) {
            Ok(()) => FullscreenOutcome::Requested(api),
            Err(_) => FullscreenOutcome::Failed(api),
        }
    }

    /// Hover start. `None` when hover is disabled or the video already plays.
    pub async fn on_pointer_enter(&self, id: VideoId) -> Option<PlayOutcome> {
        if !self.hover_autoplay {
            return None;
        }
        let video = self.video(id)?;
        if !video.is_paused() {
            return None;
        }
        Some(try_play(video).await)
    }

    /// Hover end. Returns `true` if the video was paused.
    pub fn on_pointer_leave(&self, id: VideoId) -> bool {
        if !self.hover_autoplay {
            return false;
        }
        match self.video(id) {
            Some(video) if !video.is_paused() => {
                video.pause();
                true
            }
            _ => false,
        }
    }

    /// Pause every playing video except `keep`. Returns how many were paused.
    pub fn pause_others(&self, keep: VideoId) -> usize {
        let mut paused = 0;
        for (index, video) in self.videos.iter().enumerate() {
            if index != keep.0 && !video.is_paused() {
                video.pause();
                paused += 1;
            }
        }
        paused
    }
}
