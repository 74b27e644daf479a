//! DOM event wiring for the core controllers.
//!
//! Listeners live for the lifetime of the page, so every `EventListener`
//! and observer callback is leaked with `forget()` once attached.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use page_enhancer_core::{
    playback_channel, MediaController, PageHost, PlaybackCoordinator, PlaybackStarted,
    RevealController, ScrollTopControl, VisibilityEntry, VisibilityWatcher,
};
use tracing::{debug, trace, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom::{js_error, DomElement, DomPage, DomVideo};

/// Watches cards through an `IntersectionObserver`.
struct ObserverWatcher<'a> {
    observer: &'a IntersectionObserver,
    cards: &'a [Element],
}

impl VisibilityWatcher for ObserverWatcher<'_> {
    fn watch(&mut self, index: usize) {
        if let Some(card) = self.cards.get(index) {
            self.observer.observe(card);
        }
    }

    fn unwatch(&mut self, index: usize) {
        if let Some(card) = self.cards.get(index) {
            self.observer.unobserve(card);
        }
    }
}

/// Create the observer and start watching every pending card.
///
/// If the observer cannot be constructed every card is revealed at once.
pub fn wire_reveal(controller: RevealController<DomElement>) {
    let cards: Rc<Vec<Element>> = Rc::new(
        controller
            .cards()
            .iter()
            .map(|card| card.element().clone())
            .collect(),
    );
    let options = controller.observer_options();
    let controller = Rc::new(RefCell::new(controller));

    let callback = {
        let controller = Rc::clone(&controller);
        let cards = Rc::clone(&cards);
        Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            let batch: Vec<VisibilityEntry> = entries
                .iter()
                .filter_map(|value| {
                    let entry = value.unchecked_into::<IntersectionObserverEntry>();
                    let target = entry.target();
                    cards
                        .iter()
                        .position(|card| *card == target)
                        .map(|index| VisibilityEntry {
                            index,
                            is_intersecting: entry.is_intersecting(),
                        })
                })
                .collect();
            let mut watcher = ObserverWatcher {
                observer: &observer,
                cards: &cards,
            };
            let revealed = controller.borrow_mut().handle_entries(batch, &mut watcher);
            if revealed > 0 {
                trace!(revealed, "Cards revealed");
            }
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>)
    };

    let init = IntersectionObserverInit::new();
    init.set_root_margin(&options.root_margin);
    init.set_threshold(&JsValue::from_f64(options.threshold));
    let observer =
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => observer,
            Err(e) => {
                warn!(error = %js_error(&e), "IntersectionObserver rejected, revealing all cards");
                let mut controller = controller.borrow_mut();
                for index in 0..controller.len() {
                    controller.reveal(index);
                }
                return;
            }
        };
    callback.forget();

    let mut watcher = ObserverWatcher {
        observer: &observer,
        cards: &cards,
    };
    controller.borrow().watch_all(&mut watcher);
    debug!(cards = cards.len(), root_margin = %options.root_margin, "Observing cards");
}

/// Attach click, double-click, play and (optionally) hover listeners to every video.
pub fn wire_media(media: MediaController<DomVideo>) {
    if media.is_empty() {
        return;
    }

    let media = Rc::new(media);
    let (tx, rx) = playback_channel();
    spawn_local(PlaybackCoordinator::new(Rc::clone(&media), rx).run());

    for id in media.ids() {
        let Some(video) = media.video(id).map(|v| v.element().clone()) else {
            continue;
        };

        let click_media = Rc::clone(&media);
        EventListener::new(&video, "click", move |_| {
            let media = Rc::clone(&click_media);
            spawn_local(async move {
                media.on_click(id).await;
            });
        })
        .forget();

        let dblclick_media = Rc::clone(&media);
        EventListener::new_with_options(
            &video,
            "dblclick",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                let outcome = dblclick_media.on_double_click(id);
                trace!(%id, ?outcome, "Double-click");
            },
        )
        .forget();

        let play_tx = tx.clone();
        EventListener::new(&video, "play", move |_| {
            let _ = play_tx.send(PlaybackStarted(id));
        })
        .forget();

        if media.hover_enabled() {
            let enter_media = Rc::clone(&media);
            EventListener::new(&video, "mouseenter", move |_| {
                let media = Rc::clone(&enter_media);
                spawn_local(async move {
                    media.on_pointer_enter(id).await;
                });
            })
            .forget();

            let leave_media = Rc::clone(&media);
            EventListener::new(&video, "mouseleave", move |_| {
                leave_media.on_pointer_leave(id);
            })
            .forget();
        }
    }

    debug!(videos = media.len(), hover = media.hover_enabled(), "Video listeners attached");
}

/// Keep the button's visibility in sync with scrolling and handle clicks.
pub fn wire_scroll_top(page: DomPage, control: ScrollTopControl<DomElement>) {
    let control = Rc::new(control);
    let button = control.button().element().clone();

    // Default options register a passive listener
    let scroll_page = page.clone();
    let scroll_control = Rc::clone(&control);
    EventListener::new(page.window(), "scroll", move |_| {
        scroll_control.update(scroll_page.scroll_offset());
    })
    .forget();

    EventListener::new(&button, "click", move |_| {
        control.activate(&page);
    })
    .forget();
}
