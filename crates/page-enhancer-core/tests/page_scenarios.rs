//! End-to-end scenarios against the in-memory page
//!
//! Each test installs the enhancer on a FakePage and drives it the way the
//! browser front does: visibility batches, clicks, hovers, scroll events.

use std::rc::Rc;

use page_enhancer_core::testing::{FakePage, PlayPolicy, RecordingWatcher};
use page_enhancer_core::{
    Capabilities, ClickOutcome, EnhancerConfig, FullscreenApi, FullscreenOutcome, MediaElement,
    PageEnhancer, PageHost, PlayOutcome, PlaybackCoordinator, RevealMode, ScrollBehavior, Styled,
    VideoId, VisibilityEntry,
};

const CARDS: &str = ".projects-grid > article";

fn portfolio() -> FakePage {
    FakePage::new().with_cards(CARDS, 6).with_videos(&[
        PlayPolicy::Allow,
        PlayPolicy::RequireMuted,
        PlayPolicy::Allow,
    ])
}

// ============================================================================
// Reveal
// ============================================================================

#[test]
fn test_cards_reveal_as_they_scroll_into_view() {
    let page = portfolio();
    let mut enhancement =
        PageEnhancer::new(page.clone(), EnhancerConfig::default(), Capabilities::default()).install();
    assert_eq!(enhancement.reveal_mode, RevealMode::Observe);

    let mut watcher = RecordingWatcher::default();
    enhancement.reveal.watch_all(&mut watcher);
    assert_eq!(watcher.watched().len(), 6);

    // First screen: two cards cross the threshold
    let first = (0..2).map(|index| VisibilityEntry { index, is_intersecting: true });
    assert_eq!(enhancement.reveal.handle_entries(first, &mut watcher), 2);

    // Scrolling further: cards 2..6, with the first two reported again as leaving
    let later = (0..6).map(|index| VisibilityEntry {
        index,
        is_intersecting: index >= 2,
    });
    assert_eq!(enhancement.reveal.handle_entries(later, &mut watcher), 4);

    let cards = page.cards(CARDS);
    assert!(cards.iter().all(|c| c.has_class("will-reveal") && c.has_class("is-visible")));
    assert!(watcher.watched().is_empty());
    assert_eq!(watcher.unwatch_calls(), 6);
}

#[test]
fn test_no_observer_reveals_everything_without_scrolling() {
    let page = portfolio();
    let caps = Capabilities {
        intersection_observer: false,
        ..Capabilities::default()
    };
    let enhancement = PageEnhancer::new(page.clone(), EnhancerConfig::default(), caps).install();

    assert_eq!(enhancement.reveal_mode, RevealMode::Immediate);
    assert_eq!(enhancement.reveal.revealed_count(), 6);
    assert!(page.cards(CARDS).iter().all(|c| c.has_class("is-visible")));
}

// ============================================================================
// Media
// ============================================================================

#[tokio::test]
async fn test_click_one_video_then_another() {
    let page = portfolio();
    let enhancement =
        PageEnhancer::new(page.clone(), EnhancerConfig::default(), Capabilities::default()).install();
    let media = Rc::new(enhancement.media);
    let mut coordinator = PlaybackCoordinator::new(Rc::clone(&media), page.take_playback_receiver().unwrap());
    let videos = page.videos();

    assert_eq!(
        media.on_click(VideoId(0)).await,
        ClickOutcome::Play(PlayOutcome::Started)
    );
    coordinator.drain();
    assert_eq!(media.playing_count(), 1);

    assert_eq!(
        media.on_click(VideoId(2)).await,
        ClickOutcome::Play(PlayOutcome::Started)
    );
    coordinator.drain();

    assert!(videos[0].is_paused());
    assert!(!videos[2].is_paused());
    assert_eq!(media.playing_count(), 1);

    assert_eq!(media.on_click(VideoId(2)).await, ClickOutcome::Paused);
    assert_eq!(media.playing_count(), 0);
}

#[tokio::test]
async fn test_user_unmuted_video_recovers_through_retry() {
    let page = portfolio();
    let enhancement =
        PageEnhancer::new(page.clone(), EnhancerConfig::default(), Capabilities::default()).install();
    let videos = page.videos();

    // Setup muted it; the visitor turned sound back on via native controls
    assert!(videos[1].is_muted());
    assert!(videos[1].has_attribute("muted"));
    assert!(videos[1].has_attribute("playsinline"));
    videos[1].set_muted(false);

    assert_eq!(
        enhancement.media.on_click(VideoId(1)).await,
        ClickOutcome::Play(PlayOutcome::StartedAfterMute)
    );
    assert!(videos[1].is_muted());
    assert_eq!(videos[1].play_attempts(), 2);
}

#[tokio::test]
async fn test_hover_preview_on_desktop() {
    let page = portfolio();
    let enhancement =
        PageEnhancer::new(page.clone(), EnhancerConfig::default(), Capabilities::default()).install();
    let media = Rc::new(enhancement.media);
    let mut coordinator = PlaybackCoordinator::new(Rc::clone(&media), page.take_playback_receiver().unwrap());

    // Sweep the pointer across all three cards
    for id in media.ids().collect::<Vec<_>>() {
        assert!(media.on_pointer_enter(id).await.is_some());
        coordinator.drain();
        assert_eq!(media.playing_count(), 1);
        assert!(media.on_pointer_leave(id));
        assert_eq!(media.playing_count(), 0);
    }
}

#[tokio::test]
async fn test_touch_device_has_no_hover_autoplay() {
    let page = portfolio();
    let caps = Capabilities {
        hover_pointer: false,
        ..Capabilities::default()
    };
    let enhancement = PageEnhancer::new(page.clone(), EnhancerConfig::default(), caps).install();

    assert!(!enhancement.media.hover_enabled());
    assert_eq!(enhancement.media.on_pointer_enter(VideoId(0)).await, None);
    assert_eq!(page.videos()[0].play_attempts(), 0);
}

#[test]
fn test_double_click_moves_fullscreen_between_videos() {
    let page = portfolio();
    let enhancement =
        PageEnhancer::new(page.clone(), EnhancerConfig::default(), Capabilities::default()).install();

    assert_eq!(
        enhancement.media.on_double_click(VideoId(0)),
        FullscreenOutcome::Requested(FullscreenApi::Standard)
    );
    assert_eq!(page.fullscreen_element(), Some(VideoId(0)));

    assert_eq!(
        enhancement.media.on_double_click(VideoId(2)),
        FullscreenOutcome::Requested(FullscreenApi::Standard)
    );
    assert_eq!(page.fullscreen_element(), Some(VideoId(2)));
}

#[test]
fn test_double_click_without_fullscreen_capability() {
    let page = portfolio();
    let caps = Capabilities {
        fullscreen: false,
        ..Capabilities::default()
    };
    let enhancement = PageEnhancer::new(page.clone(), EnhancerConfig::default(), caps).install();

    assert_eq!(
        enhancement.media.on_double_click(VideoId(1)),
        FullscreenOutcome::Unsupported
    );
    assert_eq!(page.fullscreen_element(), None);
}

// ============================================================================
// Scroll-top
// ============================================================================

#[test]
fn test_scroll_top_visibility_and_smooth_activation() {
    let page = portfolio();
    let enhancement =
        PageEnhancer::new(page.clone(), EnhancerConfig::default(), Capabilities::default()).install();
    let control = enhancement.scroll_top.unwrap();

    page.set_scroll_offset(601.0);
    control.update(page.scroll_offset());
    assert!(control.button().has_class("show"));

    page.set_scroll_offset(599.0);
    control.update(page.scroll_offset());
    assert!(!control.button().has_class("show"));

    page.set_scroll_offset(2400.0);
    control.activate(&page);
    assert_eq!(page.scroll_offset(), 0.0);
    assert_eq!(page.last_scroll_behavior(), Some(ScrollBehavior::Smooth));
}

#[test]
fn test_scroll_top_instant_with_reduced_motion() {
    let page = portfolio();
    let caps = Capabilities::default().with_reduced_motion(true);
    let enhancement = PageEnhancer::new(page.clone(), EnhancerConfig::default(), caps).install();
    let control = enhancement.scroll_top.unwrap();

    page.set_scroll_offset(1200.0);
    control.activate(&page);
    assert_eq!(page.scroll_offset(), 0.0);
    assert_eq!(page.last_scroll_behavior(), Some(ScrollBehavior::Instant));
}

#[test]
fn test_setup_twice_keeps_one_button() {
    let page = portfolio();
    let first =
        PageEnhancer::new(page.clone(), EnhancerConfig::default(), Capabilities::default()).install();
    let second =
        PageEnhancer::new(page.clone(), EnhancerConfig::default(), Capabilities::default()).install();

    assert!(first.scroll_top.is_some());
    assert!(second.scroll_top.is_none());
    let buttons: Vec<_> = page
        .body_children()
        .into_iter()
        .filter(|e| e.has_class("to-top-btn"))
        .collect();
    assert_eq!(buttons.len(), 1);
}
