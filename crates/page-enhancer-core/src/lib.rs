//! Page Enhancer Core Library
//!
//! Scroll reveals, preview video playback and a back-to-top button for a
//! static project page.
//!
//! ## Overview
//!
//! Three independent behaviors are set up once the document is ready:
//!
//! - **Reveal**: cards under the projects grid fade in the first time they
//!   scroll into view
//! - **Media**: preview videos play on hover or click, go fullscreen on
//!   double-click, and only one plays at a time
//! - **Scroll-top**: a floating button appears past 600px and scrolls back up
//!
//! The controllers run against the [`host::PageHost`] traits, so the same
//! logic drives the browser front and the in-memory [`testing::FakePage`].
//!
//! ## Quick Start
//!
//! ```rust
//! use page_enhancer_core::testing::{FakePage, PlayPolicy};
//! use page_enhancer_core::{Capabilities, EnhancerConfig, PageEnhancer, RevealMode};
//!
//! let page = FakePage::new()
//!     .with_cards(".projects-grid > article", 3)
//!     .with_videos(&[PlayPolicy::Allow, PlayPolicy::RequireMuted]);
//!
//! let caps = Capabilities::default().with_reduced_motion(true);
//! let enhancement = PageEnhancer::new(page, EnhancerConfig::default(), caps).install();
//!
//! assert_eq!(enhancement.reveal_mode, RevealMode::Immediate);
//! assert_eq!(enhancement.media.len(), 2);
//! assert!(enhancement.scroll_top.is_some());
//! ```

pub mod capabilities;
pub mod config;
pub mod enhancer;
pub mod error;
pub mod host;
pub mod logging;
pub mod media;
pub mod reveal;
pub mod scroll_top;
pub mod testing;

// Re-exports
pub use capabilities::{Capabilities, ScrollBehavior};
pub use config::{EnhancerConfig, MediaConfig, ObserverOptions, RevealConfig, ScrollTopConfig};
pub use enhancer::{Enhancement, PageEnhancer};
pub use error::{EnhancerError, EnhancerResult};
pub use host::{ButtonSpec, FullscreenApi, MediaElement, PageHost, Styled};
pub use media::{
    playback_channel, try_play, ClickOutcome, FullscreenOutcome, MediaController, PlayOutcome,
    PlaybackCoordinator, PlaybackReceiver, PlaybackSender, PlaybackStarted, VideoId,
};
pub use reveal::{RevealController, RevealMode, RevealState, VisibilityEntry, VisibilityWatcher};
pub use scroll_top::ScrollTopControl;
