//! Page Enhancer for the browser
//!
//! Compiled to WebAssembly and loaded by the project page. On start it
//! waits for the document to be ready, detects the platform's
//! capabilities once, and installs the core controllers with their DOM
//! listeners.
//!
//! Build with `wasm-pack build --target web` and load the generated module
//! from the page; `start` runs automatically. Pages that need different
//! selectors or thresholds embed a JSON override:
//!
//! ```html
//! <script type="application/json" id="page-enhancer-config">
//!   { "scroll_top": { "threshold": 400 } }
//! </script>
//! ```

mod console;
mod detect;
mod dom;
mod wiring;

use page_enhancer_core::{EnhancerConfig, EnhancerError, EnhancerResult, PageEnhancer, RevealMode};
use tracing::{debug, info};
use wasm_bindgen::prelude::*;

pub use detect::detect;
pub use dom::{DomElement, DomPage, DomVideo};

/// Entry point run when the module is instantiated.
#[cfg_attr(target_arch = "wasm32", wasm_bindgen(start))]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    on_ready().map_err(to_js)
}

/// Crate version, for diagnostics from the page.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js(err: EnhancerError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Element whose text, if present, is parsed as an `EnhancerConfig` override.
pub const CONFIG_ELEMENT_ID: &str = "page-enhancer-config";

/// The page's embedded config, or the defaults when there is none.
fn load_config(page: &DomPage) -> EnhancerResult<EnhancerConfig> {
    match page
        .document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    {
        Some(json) if !json.trim().is_empty() => EnhancerConfig::from_json(&json),
        _ => Ok(EnhancerConfig::default()),
    }
}

/// Run setup now, or once `DOMContentLoaded` fires if the document is still loading.
fn on_ready() -> EnhancerResult<()> {
    let window = web_sys::window().ok_or(EnhancerError::MissingHost("window"))?;
    let page = DomPage::new(window)?;

    if page.document().ready_state() == "loading" {
        let document = page.document().clone();
        gloo::events::EventListener::once(&document, "DOMContentLoaded", move |_| {
            if let Err(e) = run(page) {
                web_sys::console::error_1(&to_js(e));
            }
        })
        .forget();
        Ok(())
    } else {
        run(page)
    }
}

/// Read the config, start logging and enhance the page.
fn run(page: DomPage) -> EnhancerResult<()> {
    let config = load_config(&page)?;
    if console::init(&config.log_filter).is_err() {
        debug!("Console logging already initialized");
    }
    enhance(page, config)
}

/// Install every behavior against the live document.
pub fn enhance(page: DomPage, config: EnhancerConfig) -> EnhancerResult<()> {
    let caps = detect(page.window());
    let enhancement = PageEnhancer::new(page.clone(), config, caps).install();

    if enhancement.reveal_mode == RevealMode::Observe {
        wiring::wire_reveal(enhancement.reveal);
    }
    wiring::wire_media(enhancement.media);
    if let Some(control) = enhancement.scroll_top {
        wiring::wire_scroll_top(page, control);
    }

    info!(version = env!("CARGO_PKG_VERSION"), "Page Enhancer ready");
    Ok(())
}
