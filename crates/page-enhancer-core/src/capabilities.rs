//! Platform capabilities, detected once at startup.
//!
//! Every controller receives the same snapshot instead of querying the
//! platform at use sites. Values are never re-evaluated per event.

/// Media query matched against the user's motion preference.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Media query matched by pointers that can hover (mouse, trackpad).
pub const HOVER_QUERY: &str = "(hover: hover)";

/// How a scroll-to-top jump is animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Animated transition
    Smooth,
    /// Immediate jump
    Instant,
}

/// Snapshot of what the host platform supports and what the user prefers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Viewport-intersection observation is available
    pub intersection_observer: bool,
    /// The primary pointer can hover
    pub hover_pointer: bool,
    /// The user asked the system to reduce motion
    pub reduced_motion: bool,
    /// Some fullscreen request API exists on the platform
    pub fullscreen: bool,
}

impl Default for Capabilities {
    /// A modern desktop browser with no motion preference.
    fn default() -> Self {
        Self {
            intersection_observer: true,
            hover_pointer: true,
            reduced_motion: false,
            fullscreen: true,
        }
    }
}

impl Capabilities {
    /// A platform that supports nothing optional.
    pub fn minimal() -> Self {
        Self {
            intersection_observer: false,
            hover_pointer: false,
            reduced_motion: false,
            fullscreen: false,
        }
    }

    /// Same snapshot with the reduced-motion preference set.
    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    /// Whether cards should wait for the viewport before revealing.
    pub fn animate_reveals(&self) -> bool {
        self.intersection_observer && !self.reduced_motion
    }

    /// Whether pointer-enter/leave should drive playback.
    pub fn hover_autoplay(&self) -> bool {
        self.hover_pointer && !self.reduced_motion
    }

    /// Scroll behavior for the back-to-top jump.
    pub fn scroll_behavior(&self) -> ScrollBehavior {
        if self.reduced_motion {
            ScrollBehavior::Instant
        } else {
            ScrollBehavior::Smooth
        }
    }
}
