//! In-memory page host.
//!
//! Mirrors the parts of a browser document the controllers touch: class
//! lists, a body to append to, a scroll offset, and videos whose media
//! engine follows a configurable [`PlayPolicy`]. A successful `play()` on a
//! paused video publishes [`PlaybackStarted`] the way a browser fires its
//! `play` event.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use futures::future::{self, FutureExt, LocalBoxFuture};

use crate::capabilities::ScrollBehavior;
use crate::config::MediaConfig;
use crate::error::{EnhancerError, EnhancerResult};
use crate::host::{ButtonSpec, FullscreenApi, MediaElement, PageHost, Styled};
use crate::media::{playback_channel, PlaybackReceiver, PlaybackSender, PlaybackStarted, VideoId};
use crate::reveal::VisibilityWatcher;

#[derive(Debug, Default)]
struct ElementState {
    tag: String,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    text: String,
}

/// Element handle; clones share state like DOM references do.
#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    inner: Rc<RefCell<ElementState>>,
}

impl FakeElement {
    pub fn new(tag: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ElementState {
                tag: tag.to_string(),
                ..Default::default()
            })),
        }
    }

    pub fn tag(&self) -> String {
        self.inner.borrow().tag.clone()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.inner.borrow().attributes.get(name).cloned()
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.inner
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn text(&self) -> String {
        self.inner.borrow().text.clone()
    }

    pub fn set_text(&self, text: &str) {
        self.inner.borrow_mut().text = text.to_string();
    }

    /// Whether both handles refer to the same element.
    pub fn same_as(&self, other: &FakeElement) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Styled for FakeElement {
    fn add_class(&self, class: &str) {
        self.inner.borrow_mut().classes.insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.inner.borrow_mut().classes.remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.inner.borrow().classes.contains(class)
    }
}

/// How the fake media engine answers `play()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayPolicy {
    /// Always plays
    Allow,
    /// Plays only while muted (typical autoplay policy)
    RequireMuted,
    /// Never plays (unsupported codec, empty source, strict policy)
    Block,
}

#[derive(Debug)]
struct VideoState {
    id: VideoId,
    paused: bool,
    muted: bool,
    plays_inline: bool,
    preload: Option<String>,
    attributes: BTreeSet<String>,
    policy: PlayPolicy,
    play_attempts: u32,
    fullscreen_apis: Vec<FullscreenApi>,
    fail_fullscreen: bool,
    fullscreen_requests: u32,
    bus: Option<PlaybackSender>,
    fullscreen_slot: Rc<Cell<Option<VideoId>>>,
}

/// Video handle; clones share state.
#[derive(Debug, Clone)]
pub struct FakeVideo {
    inner: Rc<RefCell<VideoState>>,
}

impl FakeVideo {
    /// A video that publishes its play notifications on `bus`.
    pub fn new(id: VideoId, policy: PlayPolicy, bus: PlaybackSender) -> Self {
        Self::build(id, policy, Some(bus), Rc::new(Cell::new(None)))
    }

    /// A video with no subscriber.
    pub fn detached(policy: PlayPolicy) -> Self {
        Self::build(VideoId(0), policy, None, Rc::new(Cell::new(None)))
    }

    fn build(
        id: VideoId,
        policy: PlayPolicy,
        bus: Option<PlaybackSender>,
        fullscreen_slot: Rc<Cell<Option<VideoId>>>,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(VideoState {
                id,
                paused: true,
                muted: false,
                plays_inline: false,
                preload: None,
                attributes: BTreeSet::new(),
                policy,
                play_attempts: 0,
                fullscreen_apis: vec![FullscreenApi::Standard],
                fail_fullscreen: false,
                fullscreen_requests: 0,
                bus,
                fullscreen_slot,
            })),
        }
    }

    pub fn is_muted(&self) -> bool {
        self.inner.borrow().muted
    }

    pub fn plays_inline(&self) -> bool {
        self.inner.borrow().plays_inline
    }

    pub fn preload(&self) -> Option<String> {
        self.inner.borrow().preload.clone()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.inner.borrow().attributes.contains(name)
    }

    pub fn play_attempts(&self) -> u32 {
        self.inner.borrow().play_attempts
    }

    pub fn set_policy(&self, policy: PlayPolicy) {
        self.inner.borrow_mut().policy = policy;
    }

    pub fn set_fullscreen_apis(&self, apis: &[FullscreenApi]) {
        self.inner.borrow_mut().fullscreen_apis = apis.to_vec();
    }

    pub fn fail_fullscreen(&self, fail: bool) {
        self.inner.borrow_mut().fail_fullscreen = fail;
    }

    pub fn fullscreen_requests(&self) -> u32 {
        self.inner.borrow().fullscreen_requests
    }

    /// Stop publishing play notifications.
    pub fn detach(&self) {
        self.inner.borrow_mut().bus = None;
    }

    fn start(&self) -> EnhancerResult<()> {
        let mut state = self.inner.borrow_mut();
        state.play_attempts += 1;

        let allowed = match state.policy {
            PlayPolicy::Allow => true,
            PlayPolicy::RequireMuted => state.muted,
            PlayPolicy::Block => false,
        };
        if !allowed {
            return Err(EnhancerError::PlayRejected("NotAllowedError".to_string()));
        }

        if state.paused {
            state.paused = false;
            if let Some(bus) = &state.bus {
                let _ = bus.send(PlaybackStarted(state.id));
            }
        }
        Ok(())
    }
}

impl MediaElement for FakeVideo {
    fn is_paused(&self) -> bool {
        self.inner.borrow().paused
    }

    fn play(&self) -> LocalBoxFuture<'static, EnhancerResult<()>> {
        future::ready(self.start()).boxed_local()
    }

    fn pause(&self) {
        self.inner.borrow_mut().paused = true;
    }

    fn set_muted(&self, muted: bool) {
        let mut state = self.inner.borrow_mut();
        state.muted = muted;
        if muted {
            state.attributes.insert("muted".to_string());
        } else {
            state.attributes.remove("muted");
        }
    }

    fn set_plays_inline(&self, inline: bool) {
        let mut state = self.inner.borrow_mut();
        state.plays_inline = inline;
        if inline {
            state.attributes.insert("playsinline".to_string());
        } else {
            state.attributes.remove("playsinline");
        }
    }

    fn set_preload(&self, preload: &str) {
        self.inner.borrow_mut().preload = Some(preload.to_string());
    }

    fn supports_fullscreen(&self, api: FullscreenApi) -> bool {
        self.inner.borrow().fullscreen_apis.contains(&api)
    }

    fn request_fullscreen(&self, api: FullscreenApi) -> EnhancerResult<()> {
        let mut state = self.inner.borrow_mut();
        if !state.fullscreen_apis.contains(&api) {
            return Err(EnhancerError::Fullscreen(format!("{} missing", api.method_name())));
        }
        state.fullscreen_requests += 1;
        if state.fail_fullscreen {
            return Err(EnhancerError::Fullscreen("TypeError".to_string()));
        }
        state.fullscreen_slot.set(Some(state.id));
        Ok(())
    }
}

struct PageState {
    selections: RefCell<HashMap<String, Vec<FakeElement>>>,
    videos: RefCell<HashMap<String, Vec<FakeVideo>>>,
    body: RefCell<Vec<FakeElement>>,
    scroll: Cell<f64>,
    last_behavior: Cell<Option<ScrollBehavior>>,
    fail_append: Cell<bool>,
    tx: PlaybackSender,
    rx: RefCell<Option<PlaybackReceiver>>,
    fullscreen: Rc<Cell<Option<VideoId>>>,
}

/// In-memory document.
#[derive(Clone)]
pub struct FakePage {
    state: Rc<PageState>,
}

impl Default for FakePage {
    fn default() -> Self {
        Self::new()
    }
}

impl FakePage {
    pub fn new() -> Self {
        let (tx, rx) = playback_channel();
        Self {
            state: Rc::new(PageState {
                selections: RefCell::new(HashMap::new()),
                videos: RefCell::new(HashMap::new()),
                body: RefCell::new(Vec::new()),
                scroll: Cell::new(0.0),
                last_behavior: Cell::new(None),
                fail_append: Cell::new(false),
                tx,
                rx: RefCell::new(Some(rx)),
                fullscreen: Rc::new(Cell::new(None)),
            }),
        }
    }

    /// Add `count` cards answering `selector`.
    pub fn with_cards(self, selector: &str, count: usize) -> Self {
        let cards = (0..count).map(|_| FakeElement::new("article"));
        self.state
            .selections
            .borrow_mut()
            .entry(selector.to_string())
            .or_default()
            .extend(cards);
        self
    }

    /// Add one video per policy under the default video selector.
    pub fn with_videos(self, policies: &[PlayPolicy]) -> Self {
        let selector = MediaConfig::default().video_selector;
        {
            let mut videos = self.state.videos.borrow_mut();
            let list = videos.entry(selector).or_default();
            for policy in policies {
                let id = VideoId(list.len());
                list.push(FakeVideo::build(
                    id,
                    *policy,
                    Some(self.state.tx.clone()),
                    Rc::clone(&self.state.fullscreen),
                ));
            }
        }
        self
    }

    pub fn cards(&self, selector: &str) -> Vec<FakeElement> {
        self.state
            .selections
            .borrow()
            .get(selector)
            .cloned()
            .unwrap_or_default()
    }

    pub fn videos(&self) -> Vec<FakeVideo> {
        self.select_videos(&MediaConfig::default().video_selector)
    }

    pub fn body_children(&self) -> Vec<FakeElement> {
        self.state.body.borrow().clone()
    }

    pub fn set_scroll_offset(&self, offset: f64) {
        self.state.scroll.set(offset);
    }

    pub fn last_scroll_behavior(&self) -> Option<ScrollBehavior> {
        self.state.last_behavior.get()
    }

    /// Make `append_button` fail.
    pub fn fail_appends(&self, fail: bool) {
        self.state.fail_append.set(fail);
    }

    /// The element currently presented fullscreen.
    pub fn fullscreen_element(&self) -> Option<VideoId> {
        self.state.fullscreen.get()
    }

    /// Take the receiving end of the page's playback channel (once).
    pub fn take_playback_receiver(&self) -> Option<PlaybackReceiver> {
        self.state.rx.borrow_mut().take()
    }
}

impl PageHost for FakePage {
    type Element = FakeElement;
    type Video = FakeVideo;

    fn select_all(&self, selector: &str) -> Vec<FakeElement> {
        self.cards(selector)
    }

    fn select_videos(&self, selector: &str) -> Vec<FakeVideo> {
        self.state
            .videos
            .borrow()
            .get(selector)
            .cloned()
            .unwrap_or_default()
    }

    fn has_element_with_class(&self, class: &str) -> bool {
        let in_body = self.state.body.borrow().iter().any(|e| e.has_class(class));
        in_body
            || self
                .state
                .selections
                .borrow()
                .values()
                .flatten()
                .any(|e| e.has_class(class))
    }

    fn append_button(&self, spec: &ButtonSpec) -> EnhancerResult<FakeElement> {
        if self.state.fail_append.get() {
            return Err(EnhancerError::Host("appendChild failed".to_string()));
        }
        let button = FakeElement::new("button");
        button.set_attribute("type", "button");
        button.add_class(&spec.class);
        button.set_attribute("aria-label", &spec.aria_label);
        button.set_text(&spec.text);
        self.state.body.borrow_mut().push(button.clone());
        Ok(button)
    }

    fn scroll_offset(&self) -> f64 {
        self.state.scroll.get()
    }

    fn scroll_to_top(&self, behavior: ScrollBehavior) {
        self.state.last_behavior.set(Some(behavior));
        self.state.scroll.set(0.0);
    }
}

/// Watcher that records which card indices are being watched.
#[derive(Debug, Default)]
pub struct RecordingWatcher {
    watched: BTreeSet<usize>,
    unwatch_calls: usize,
}

impl RecordingWatcher {
    pub fn watched(&self) -> Vec<usize> {
        self.watched.iter().copied().collect()
    }

    pub fn unwatch_calls(&self) -> usize {
        self.unwatch_calls
    }
}

impl VisibilityWatcher for RecordingWatcher {
    fn watch(&mut self, index: usize) {
        self.watched.insert(index);
    }

    fn unwatch(&mut self, index: usize) {
        self.watched.remove(&index);
        self.unwatch_calls += 1;
    }
}
