//! One-time capability detection against the live window.

use js_sys::Reflect;
use page_enhancer_core::capabilities::{HOVER_QUERY, REDUCED_MOTION_QUERY};
use page_enhancer_core::{Capabilities, FullscreenApi};
use wasm_bindgen::JsValue;
use web_sys::Window;

/// Snapshot the platform's capabilities and the user's preferences.
pub fn detect(window: &Window) -> Capabilities {
    let caps = Capabilities {
        intersection_observer: has_property(window, "IntersectionObserver"),
        hover_pointer: media_matches(window, HOVER_QUERY),
        reduced_motion: media_matches(window, REDUCED_MOTION_QUERY),
        fullscreen: fullscreen_available(window),
    };
    tracing::debug!(?caps, "Capabilities detected");
    caps
}

fn has_property(target: &JsValue, name: &str) -> bool {
    Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
}

fn media_matches(window: &Window, query: &str) -> bool {
    match window.match_media(query) {
        Ok(Some(list)) => list.matches(),
        _ => false,
    }
}

/// Any fullscreen request method on `Element.prototype`.
fn fullscreen_available(window: &Window) -> bool {
    let Ok(element) = Reflect::get(window, &JsValue::from_str("Element")) else {
        return false;
    };
    let Ok(prototype) = Reflect::get(&element, &JsValue::from_str("prototype")) else {
        return false;
    };
    if !prototype.is_object() {
        return false;
    }
    FullscreenApi::ALL
        .iter()
        .any(|api| has_property(&prototype, api.method_name()))
}
