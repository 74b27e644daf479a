//! `web-sys` implementations of the core host traits.

use futures::future::{FutureExt, LocalBoxFuture};
use js_sys::{Function, Promise, Reflect};
use page_enhancer_core::{
    ButtonSpec, EnhancerError, EnhancerResult, FullscreenApi, MediaElement, PageHost,
    ScrollBehavior, Styled,
};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlElement, HtmlVideoElement, ScrollToOptions, Window};

/// Render a JS exception for an error message.
pub(crate) fn js_error(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            Reflect::get(err, &JsValue::from_str("name"))
                .ok()
                .and_then(|name| name.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", err))
}

/// Any element styled through its class list.
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement(Element);

impl DomElement {
    pub fn element(&self) -> &Element {
        &self.0
    }
}

impl Styled for DomElement {
    fn add_class(&self, class: &str) {
        if let Err(e) = self.0.class_list().add_1(class) {
            warn!(class, error = %js_error(&e), "classList.add failed");
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(e) = self.0.class_list().remove_1(class) {
            warn!(class, error = %js_error(&e), "classList.remove failed");
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }
}

/// A `<video>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct DomVideo(HtmlVideoElement);

impl DomVideo {
    pub fn element(&self) -> &HtmlVideoElement {
        &self.0
    }

    fn set_flag_attribute(&self, name: &str, on: bool) {
        let result = if on {
            self.0.set_attribute(name, "")
        } else {
            self.0.remove_attribute(name)
        };
        if let Err(e) = result {
            warn!(attribute = name, error = %js_error(&e), "Could not update attribute");
        }
    }

    fn method(&self, api: FullscreenApi) -> Option<Function> {
        Reflect::get(&self.0, &JsValue::from_str(api.method_name()))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
    }
}

impl MediaElement for DomVideo {
    fn is_paused(&self) -> bool {
        self.0.paused()
    }

    fn play(&self) -> LocalBoxFuture<'static, EnhancerResult<()>> {
        let promise: Result<Promise, JsValue> = self.0.play();
        async move {
            let promise = promise.map_err(|e| EnhancerError::PlayRejected(js_error(&e)))?;
            JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|e| EnhancerError::PlayRejected(js_error(&e)))
        }
        .boxed_local()
    }

    fn pause(&self) {
        if let Err(e) = self.0.pause() {
            warn!(error = %js_error(&e), "pause() failed");
        }
    }

    fn set_muted(&self, muted: bool) {
        self.0.set_muted(muted);
        self.set_flag_attribute("muted", muted);
    }

    fn set_plays_inline(&self, inline: bool) {
        // iOS reads the property, older WebKit the attribute
        if let Err(e) = Reflect::set(
            &self.0,
            &JsValue::from_str("playsInline"),
            &JsValue::from_bool(inline),
        ) {
            warn!(error = %js_error(&e), "Could not set playsInline");
        }
        self.set_flag_attribute("playsinline", inline);
    }

    fn set_preload(&self, preload: &str) {
        self.0.set_preload(preload);
    }

    fn supports_fullscreen(&self, api: FullscreenApi) -> bool {
        self.method(api).is_some()
    }

    fn request_fullscreen(&self, api: FullscreenApi) -> EnhancerResult<()> {
        let method = self
            .method(api)
            .ok_or_else(|| EnhancerError::Fullscreen(format!("{} missing", api.method_name())))?;
        let result = method
            .call0(&self.0)
            .map_err(|e| EnhancerError::Fullscreen(js_error(&e)))?;

        // The standard API returns a promise; keep its rejection from reaching the console
        if let Ok(promise) = result.dyn_into::<Promise>() {
            wasm_bindgen_futures::spawn_local(async move {
                let _ = JsFuture::from(promise).await;
            });
        }
        Ok(())
    }
}

/// The live document and its window.
#[derive(Debug, Clone)]
pub struct DomPage {
    window: Window,
    document: Document,
}

impl DomPage {
    pub fn new(window: Window) -> EnhancerResult<Self> {
        let document = window.document().ok_or(EnhancerError::MissingHost("document"))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn query(&self, selector: &str) -> Vec<Element> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(e) => {
                warn!(selector, error = %js_error(&e), "Invalid selector");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn body(&self) -> EnhancerResult<HtmlElement> {
        self.document.body().ok_or(EnhancerError::MissingHost("body"))
    }
}

impl PageHost for DomPage {
    type Element = DomElement;
    type Video = DomVideo;

    fn select_all(&self, selector: &str) -> Vec<DomElement> {
        self.query(selector).into_iter().map(DomElement).collect()
    }

    fn select_videos(&self, selector: &str) -> Vec<DomVideo> {
        self.query(selector)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlVideoElement>().ok())
            .map(DomVideo)
            .collect()
    }

    fn has_element_with_class(&self, class: &str) -> bool {
        self.document
            .get_elements_by_class_name(class)
            .length()
            > 0
    }

    fn append_button(&self, spec: &ButtonSpec) -> EnhancerResult<DomElement> {
        let host_err = |e: JsValue| EnhancerError::Host(js_error(&e));

        let button = self.document.create_element("button").map_err(host_err)?;
        button.set_attribute("type", "button").map_err(host_err)?;
        button.set_class_name(&spec.class);
        button
            .set_attribute("aria-label", &spec.aria_label)
            .map_err(host_err)?;
        button.set_text_content(Some(&spec.text));

        self.body()?.append_child(&button).map_err(host_err)?;
        Ok(DomElement(button))
    }

    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to_top(&self, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}
