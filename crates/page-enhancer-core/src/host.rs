//! Host abstractions the controllers run against.
//!
//! The browser front implements these over `web-sys`; [`crate::testing`]
//! implements them in memory. Controllers only ever see elements handed to
//! them at construction.

use futures::future::LocalBoxFuture;

use crate::capabilities::ScrollBehavior;
use crate::error::EnhancerResult;

/// An element whose presentation is driven by CSS classes.
pub trait Styled {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;

    /// Add or remove `class` depending on `on`.
    fn toggle_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }
}

/// Platform-specific fullscreen request methods, in preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenApi {
    Standard,
    Webkit,
    Ms,
}

impl FullscreenApi {
    /// Preference order used when picking a request method.
    pub const ALL: [FullscreenApi; 3] = [FullscreenApi::Standard, FullscreenApi::Webkit, FullscreenApi::Ms];

    /// Name of the request method on an element.
    pub fn method_name(&self) -> &'static str {
        match self {
            FullscreenApi::Standard => "requestFullscreen",
            FullscreenApi::Webkit => "webkitRequestFullscreen",
            FullscreenApi::Ms => "msRequestFullscreen",
        }
    }
}

/// A playable media element.
///
/// Playback state lives in the platform's media engine; implementations
/// report it, they don't cache it.
pub trait MediaElement {
    fn is_paused(&self) -> bool;

    /// Ask the media engine to start playback. Resolves once the engine
    /// accepts or rejects the request.
    fn play(&self) -> LocalBoxFuture<'static, EnhancerResult<()>>;

    fn pause(&self);
    fn set_muted(&self, muted: bool);
    fn set_plays_inline(&self, inline: bool);
    fn set_preload(&self, preload: &str);

    /// Whether this element exposes the given fullscreen request method.
    fn supports_fullscreen(&self, api: FullscreenApi) -> bool;

    fn request_fullscreen(&self, api: FullscreenApi) -> EnhancerResult<()>;
}

/// Attributes of the injected back-to-top button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSpec {
    pub class: String,
    pub aria_label: String,
    pub text: String,
}

/// The document the enhancer attaches to.
pub trait PageHost {
    type Element: Styled;
    type Video: MediaElement;

    /// All elements matching `selector`, in document order.
    fn select_all(&self, selector: &str) -> Vec<Self::Element>;

    /// All videos matching `selector`, in document order.
    fn select_videos(&self, selector: &str) -> Vec<Self::Video>;

    /// Whether any element in the document carries `class`.
    fn has_element_with_class(&self, class: &str) -> bool;

    /// Create a `<button type="button">` and append it to the body.
    fn append_button(&self, spec: &ButtonSpec) -> EnhancerResult<Self::Element>;

    /// Current vertical scroll offset.
    fn scroll_offset(&self) -> f64;

    fn scroll_to_top(&self, behavior: ScrollBehavior);
}
