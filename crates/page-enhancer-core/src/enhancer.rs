//! One-shot setup of all three behaviors against a page.

use tracing::info;

use crate::capabilities::Capabilities;
use crate::config::EnhancerConfig;
use crate::host::PageHost;
use crate::media::MediaController;
use crate::reveal::{RevealController, RevealMode};
use crate::scroll_top::ScrollTopControl;

/// Captures the page's elements and builds the controllers.
pub struct PageEnhancer<H> {
    host: H,
    config: EnhancerConfig,
    caps: Capabilities,
}

/// Controllers produced by [`PageEnhancer::install`], ready for event wiring.
pub struct Enhancement<H: PageHost> {
    pub reveal: RevealController<H::Element>,
    pub reveal_mode: RevealMode,
    pub media: MediaController<H::Video>,
    /// `None` when a back-to-top button already existed
    pub scroll_top: Option<ScrollTopControl<H::Element>>,
}

impl<H: PageHost> PageEnhancer<H> {
    pub fn new(host: H, config: EnhancerConfig, caps: Capabilities) -> Self {
        Self { host, config, caps }
    }

    /// Query the page once and set up each behavior independently.
    pub fn install(&self) -> Enhancement<H> {
        let cards = self.host.select_all(&self.config.reveal.card_selector);
        let mut reveal = RevealController::new(cards, self.config.reveal.clone(), &self.caps);
        let reveal_mode = reveal.prepare();

        let videos = self.host.select_videos(&self.config.media.video_selector);
        let media = MediaController::new(videos, &self.config.media, &self.caps);

        let scroll_top = ScrollTopControl::install(&self.host, &self.config.scroll_top, &self.caps);

        info!(
            cards = reveal.len(),
            ?reveal_mode,
            videos = media.len(),
            scroll_top = scroll_top.is_some(),
            "Page enhanced"
        );

        Enhancement {
            reveal,
            reveal_mode,
            media,
            scroll_top,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePage;

    #[test]
    fn test_install_on_empty_page() {
        let page = FakePage::new();
        let enhancer = PageEnhancer::new(page.clone(), EnhancerConfig::default(), Capabilities::default());
        let enhancement = enhancer.install();

        assert_eq!(enhancement.reveal_mode, RevealMode::Empty);
        assert!(enhancement.media.is_empty());
        assert!(enhancement.scroll_top.is_some());
    }

    #[test]
    fn test_install_uses_configured_selectors() {
        let page = FakePage::new().with_cards(".grid > li", 2).with_cards(".projects-grid > article", 5);
        let mut config = EnhancerConfig::default();
        config.reveal.card_selector = ".grid > li".to_string();

        let enhancement = PageEnhancer::new(page, config, Capabilities::default()).install();
        assert_eq!(enhancement.reveal.len(), 2);
    }
}
