//! Mutual exclusion between videos.
//!
//! Each video publishes [`PlaybackStarted`] when its media engine reports
//! that playback began. The coordinator is the only subscriber and pauses
//! every other playing video in response.

use std::rc::Rc;

use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{debug, trace};

use super::{MediaController, VideoId};
use crate::host::MediaElement;

/// Notification that a video entered the playing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackStarted(pub VideoId);

/// Sending half handed to every video's play listener
pub type PlaybackSender = mpsc::UnboundedSender<PlaybackStarted>;

/// Receiving half owned by the coordinator
pub type PlaybackReceiver = mpsc::UnboundedReceiver<PlaybackStarted>;

/// Create the playback notification channel.
pub fn playback_channel() -> (PlaybackSender, PlaybackReceiver) {
    mpsc::unbounded_channel()
}

/// Enforces "at most one video playing" by reacting to start notifications.
pub struct PlaybackCoordinator<V> {
    media: Rc<MediaController<V>>,
    rx: PlaybackReceiver,
}

impl<V: MediaElement> PlaybackCoordinator<V> {
    pub fn new(media: Rc<MediaController<V>>, rx: PlaybackReceiver) -> Self {
        Self { media, rx }
    }

    /// Handle one notification. Returns how many videos were paused.
    pub fn handle(&self, event: PlaybackStarted) -> usize {
        let PlaybackStarted(id) = event;
        let paused = self.media.pause_others(id);
        if paused > 0 {
            trace!(%id, paused, "Paused other videos");
        }
        paused
    }

    /// Handle every notification already queued. Returns how many were handled.
    pub fn drain(&mut self) -> usize {
        let mut handled = 0;
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    self.handle(event);
                    handled += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        handled
    }

    /// Process notifications until every sender is dropped.
    pub async fn run(mut self) {
        debug!(videos = self.media.len(), "Playback coordinator started");
        while let Some(event) = self.rx.recv().await {
            self.handle(event);
        }
        debug!("Playback coordinator stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::Capabilities;
    use crate::config::MediaConfig;
    use crate::testing::{FakeVideo, PlayPolicy};

    fn setup(n: usize) -> (Vec<FakeVideo>, PlaybackCoordinator<FakeVideo>) {
        let (tx, rx) = playback_channel();
        let videos: Vec<_> = (0..n)
            .map(|i| FakeVideo::new(VideoId(i), PlayPolicy::Allow, tx.clone()))
            .collect();
        let media = Rc::new(MediaController::new(
            videos.clone(),
            &MediaConfig::default(),
            &Capabilities::default(),
        ));
        (videos, PlaybackCoordinator::new(media, rx))
    }

    #[tokio::test]
    async fn test_start_pauses_previous() {
        let (videos, mut coordinator) = setup(3);

        videos[0].play().await.unwrap();
        assert_eq!(coordinator.drain(), 1);
        videos[2].play().await.unwrap();
        assert_eq!(coordinator.drain(), 1);

        assert!(videos[0].is_paused());
        assert!(videos[1].is_paused());
        assert!(!videos[2].is_paused());
    }

    #[tokio::test]
    async fn test_run_ends_when_senders_dropped() {
        let (tx, rx) = playback_channel();
        let a = FakeVideo::new(VideoId(0), PlayPolicy::Allow, tx.clone());
        let b = FakeVideo::new(VideoId(1), PlayPolicy::Allow, tx.clone());
        let media = Rc::new(MediaController::new(
            vec![a.clone(), b.clone()],
            &MediaConfig::default(),
            &Capabilities::default(),
        ));
        let coordinator = PlaybackCoordinator::new(media, rx);

        a.play().await.unwrap();
        b.play().await.unwrap();
        drop(tx);
        a.detach();
        b.detach();

        coordinator.run().await;
        assert!(a.is_paused());
        assert!(!b.is_paused());
    }

    #[test]
    fn test_drain_on_empty_channel() {
        let (_videos, mut coordinator) = setup(2);
        assert_eq!(coordinator.drain(), 0);
    }
}
