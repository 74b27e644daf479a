//! Configuration for Page Enhancer
//!
//! Every field has a default matching the page's stylesheet contract, so an
//! empty JSON object (or no config at all) gives the stock behavior.
//!
//! ```rust
//! use page_enhancer_core::EnhancerConfig;
//!
//! let config = EnhancerConfig::from_json(r#"{ "scroll_top": { "threshold": 400 } }"#).unwrap();
//! assert_eq!(config.scroll_top.threshold, 400.0);
//! assert_eq!(config.reveal.visible_class, "is-visible");
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{EnhancerError, EnhancerResult};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerConfig {
    pub reveal: RevealConfig,
    pub media: MediaConfig,
    pub scroll_top: ScrollTopConfig,
    /// `EnvFilter` directive string, e.g. `"info"` or `"page_enhancer_core=debug"`
    pub log_filter: String,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            reveal: RevealConfig::default(),
            media: MediaConfig::default(),
            scroll_top: ScrollTopConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

/// Card reveal settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Selector for the revealable cards (direct children of the grid)
    pub card_selector: String,
    /// Class added to every card at setup
    pub pending_class: String,
    /// Class added when a card is revealed
    pub visible_class: String,
    /// Percentage of viewport height trimmed from the bottom of the trigger zone
    pub bottom_margin_percent: f64,
    /// Minimum visible fraction before a card counts as intersecting
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            card_selector: ".projects-grid > article".to_string(),
            pending_class: "will-reveal".to_string(),
            visible_class: "is-visible".to_string(),
            bottom_margin_percent: 10.0,
            threshold: 0.1,
        }
    }
}

/// Options handed to the platform's intersection observer.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    /// CSS margin string, e.g. `"0px 0px -10% 0px"`
    pub root_margin: String,
    pub threshold: f64,
}

impl RevealConfig {
    /// Observer options derived from this config.
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions {
            root_margin: format!("0px 0px -{}% 0px", self.bottom_margin_percent),
            threshold: self.threshold,
        }
    }
}

/// Preview video settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Selector for the managed videos
    pub video_selector: String,
    /// Value for the `preload` property
    pub preload: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            video_selector: ".project-media video".to_string(),
            preload: "metadata".to_string(),
        }
    }
}

/// Back-to-top button settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollTopConfig {
    /// Marker class; its presence in the document prevents a second button
    pub marker_class: String,
    /// Class toggled while the button should be shown
    pub visible_class: String,
    /// Accessible label
    pub label: String,
    /// Visible button text
    pub glyph: String,
    /// Scroll offset past which the button is shown
    pub threshold: f64,
}

impl Default for ScrollTopConfig {
    fn default() -> Self {
        Self {
            marker_class: "to-top-btn".to_string(),
            visible_class: "show".to_string(),
            label: "Back to top".to_string(),
            glyph: "\u{2191}".to_string(),
            threshold: 600.0,
        }
    }
}

impl EnhancerConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> EnhancerResult<Self> {
        let config: EnhancerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges and required strings.
    pub fn validate(&self) -> EnhancerResult<()> {
        let required = [
            ("reveal.card_selector", &self.reveal.card_selector),
            ("reveal.pending_class", &self.reveal.pending_class),
            ("reveal.visible_class", &self.reveal.visible_class),
            ("media.video_selector", &self.media.video_selector),
            ("scroll_top.marker_class", &self.scroll_top.marker_class),
            ("scroll_top.visible_class", &self.scroll_top.visible_class),
            ("scroll_top.label", &self.scroll_top.label),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(EnhancerError::Config(format!("{} must not be empty", name)));
            }
        }

        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(EnhancerError::Config(format!(
                "reveal.threshold must be within 0..=1, got {}",
                self.reveal.threshold
            )));
        }
        if !(0.0..=100.0).contains(&self.reveal.bottom_margin_percent) {
            return Err(EnhancerError::Config(format!(
                "reveal.bottom_margin_percent must be within 0..=100, got {}",
                self.reveal.bottom_margin_percent
            )));
        }
        if !self.scroll_top.threshold.is_finite() || self.scroll_top.threshold < 0.0 {
            return Err(EnhancerError::Config(format!(
                "scroll_top.threshold must be a non-negative number, got {}",
                self.scroll_top.threshold
            )));
        }

        EnvFilter::try_new(&self.log_filter)
            .map_err(|e| EnhancerError::Config(format!("log_filter: {}", e)))?;

        Ok(())
    }
}
