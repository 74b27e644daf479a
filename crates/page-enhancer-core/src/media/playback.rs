//! The play-request protocol.
//!
//! Autoplay policies commonly reject `play()` on unmuted media. Every
//! playback start goes through [`try_play`], which retries once with the
//! video forced muted and inline, then gives up without surfacing anything.

use crate::host::MediaElement;

/// Result of one run of the play-request protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// First attempt succeeded
    Started,
    /// First attempt was rejected, the muted retry succeeded
    StartedAfterMute,
    /// Both attempts were rejected; the video stays paused
    Suppressed,
}

impl PlayOutcome {
    pub fn is_playing(&self) -> bool {
        !matches!(self, PlayOutcome::Suppressed)
    }
}

/// Attempt playback, retrying once muted and inline.
pub async fn try_play<V: MediaElement + ?Sized>(video: &V) -> PlayOutcome {
    if video.play().await.is_ok() {
        return PlayOutcome::Started;
    }

    video.set_muted(true);
    video.set_plays_inline(true);

    match video.play().await {
        Ok(()) => PlayOutcome::StartedAfterMute,
        Err(_) => PlayOutcome::Suppressed,
    }
}
