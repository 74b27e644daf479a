//! Floating back-to-top button.

use tracing::{debug, warn};

use crate::capabilities::{Capabilities, ScrollBehavior};
use crate::config::ScrollTopConfig;
use crate::host::{ButtonSpec, PageHost, Styled};

/// The injected button and its visibility rule.
pub struct ScrollTopControl<E> {
    button: E,
    visible_class: String,
    threshold: f64,
    behavior: ScrollBehavior,
}

impl<E: Styled> ScrollTopControl<E> {
    /// Create the button unless one already exists.
    ///
    /// Returns `None` when a button with the marker class is already in the
    /// document or the host cannot create one.
    pub fn install<H>(host: &H, config: &ScrollTopConfig, caps: &Capabilities) -> Option<Self>
    where
        H: PageHost<Element = E>,
    {
        if host.has_element_with_class(&config.marker_class) {
            debug!("Back-to-top button already present");
            return None;
        }

        let spec = ButtonSpec {
            class: config.marker_class.clone(),
            aria_label: config.label.clone(),
            text: config.glyph.clone(),
        };
        let button = match host.append_button(&spec) {
            Ok(button) => button,
            Err(e) => {
                warn!(error = %e, "Could not create back-to-top button");
                return None;
            }
        };

        let control = Self {
            button,
            visible_class: config.visible_class.clone(),
            threshold: config.threshold,
            behavior: caps.scroll_behavior(),
        };
        control.update(host.scroll_offset());
        Some(control)
    }

    pub fn button(&self) -> &E {
        &self.button
    }

    pub fn behavior(&self) -> ScrollBehavior {
        self.behavior
    }

    /// Show the button iff `offset` is past the threshold. Returns the new visibility.
    pub fn update(&self, offset: f64) -> bool {
        let visible = offset > self.threshold;
        self.button.toggle_class(&self.visible_class, visible);
        visible
    }

    /// Scroll the page back to the top.
    pub fn activate<H: PageHost>(&self, host: &H) {
        host.scroll_to_top(self.behavior);
    }
}
