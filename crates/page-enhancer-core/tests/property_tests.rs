//! Property-based tests for the reveal and media controllers
//!
//! Uses proptest to check the one-way reveal and the at-most-one-playing
//! invariant under arbitrary interleavings of user input.

use std::rc::Rc;

use futures::executor::block_on;
use page_enhancer_core::testing::{FakePage, PlayPolicy, RecordingWatcher};
use page_enhancer_core::{
    Capabilities, ClickOutcome, EnhancerConfig, MediaElement, PageEnhancer, PlaybackCoordinator,
    RevealState, VideoId, VisibilityEntry,
};
use proptest::prelude::*;

// ============================================================================
// Strategy Generators
// ============================================================================

fn policy_strategy() -> impl Strategy<Value = PlayPolicy> {
    prop_oneof![
        3 => Just(PlayPolicy::Allow),
        2 => Just(PlayPolicy::RequireMuted),
        1 => Just(PlayPolicy::Block),
    ]
}

/// User input on the video grid
#[derive(Debug, Clone)]
enum MediaOp {
    Click(usize),
    Enter(usize),
    Leave(usize),
    Unmute(usize),
}

fn media_ops_strategy(max_ops: usize) -> impl Strategy<Value = Vec<MediaOp>> {
    prop::collection::vec(
        prop_oneof![
            3 => (0..8usize).prop_map(MediaOp::Click),
            2 => (0..8usize).prop_map(MediaOp::Enter),
            2 => (0..8usize).prop_map(MediaOp::Leave),
            1 => (0..8usize).prop_map(MediaOp::Unmute),
        ],
        0..max_ops,
    )
}

/// Batches of (card index, intersecting) notifications
fn visibility_batches_strategy() -> impl Strategy<Value = Vec<Vec<(usize, bool)>>> {
    prop::collection::vec(
        prop::collection::vec((0..12usize, any::<bool>()), 0..8),
        0..10,
    )
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// No interleaving of clicks, hovers and unmutes leaves two videos playing
    #[test]
    fn at_most_one_video_plays(
        policies in prop::collection::vec(policy_strategy(), 1..6),
        ops in media_ops_strategy(40),
    ) {
        let page = FakePage::new().with_videos(&policies);
        let enhancement =
            PageEnhancer::new(page.clone(), EnhancerConfig::default(), Capabilities::default()).install();
        let media = Rc::new(enhancement.media);
        let mut coordinator =
            PlaybackCoordinator::new(Rc::clone(&media), page.take_playback_receiver().unwrap());
        let videos = page.videos();

        for op in ops {
            match op {
                MediaOp::Click(i) => {
                    block_on(media.on_click(VideoId(i % videos.len())));
                }
                MediaOp::Enter(i) => {
                    block_on(media.on_pointer_enter(VideoId(i % videos.len())));
                }
                MediaOp::Leave(i) => {
                    media.on_pointer_leave(VideoId(i % videos.len()));
                }
                MediaOp::Unmute(i) => videos[i % videos.len()].set_muted(false),
            }
            coordinator.drain();
            prop_assert!(media.playing_count() <= 1);
        }
    }

    /// Clicking a playing video always pauses it
    #[test]
    fn click_on_playing_video_pauses(policies in prop::collection::vec(policy_strategy(), 1..6)) {
        let page = FakePage::new().with_videos(&policies);
        let enhancement =
            PageEnhancer::new(page.clone(), EnhancerConfig::default(), Capabilities::default()).install();

        for id in enhancement.media.ids().collect::<Vec<_>>() {
            let first = block_on(enhancement.media.on_click(id));
            let playing = !page.videos()[id.0].is_paused();
            match first {
                ClickOutcome::Play(outcome) => prop_assert_eq!(outcome.is_playing(), playing),
                other => prop_assert!(false, "unexpected first click outcome {:?}", other),
            }
            if playing {
                prop_assert_eq!(block_on(enhancement.media.on_click(id)), ClickOutcome::Paused);
                prop_assert!(page.videos()[id.0].is_paused());
            }
        }
    }

    /// A card never goes back to pending and is revealed at most once
    #[test]
    fn reveal_is_monotonic(cards in 1..12usize, batches in visibility_batches_strategy()) {
        let page = FakePage::new().with_cards(".projects-grid > article", cards);
        let mut enhancement =
            PageEnhancer::new(page, EnhancerConfig::default(), Capabilities::default()).install();
        let mut watcher = RecordingWatcher::default();
        enhancement.reveal.watch_all(&mut watcher);

        let mut total = 0;
        let mut previous = vec![RevealState::Pending; cards];
        for batch in batches {
            let entries = batch
                .into_iter()
                .map(|(index, is_intersecting)| VisibilityEntry { index, is_intersecting });
            total += enhancement.reveal.handle_entries(entries, &mut watcher);

            for (index, before) in previous.iter_mut().enumerate() {
                let now = enhancement.reveal.state(index).unwrap();
                if *before == RevealState::Revealed {
                    prop_assert_eq!(now, RevealState::Revealed);
                }
                *before = now;
            }
        }

        prop_assert_eq!(total, enhancement.reveal.revealed_count());
        prop_assert_eq!(watcher.unwatch_calls(), total);
        prop_assert_eq!(watcher.watched().len(), cards - total);
    }
}
