//! Glitch engine bindings
//!
//! `attachGlitch(element, config?)` wires a [`Reveal`] to a span's pointer
//! events and a [`FrameLoop`], returning a handle whose `teardown()` undoes
//! all of it.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, MouseEvent};

use crate::api::dom::DomRedaction;
use crate::api::frames::FrameLoop;
use crate::api::helpers::{deserialize, is_absent, warn_on_dom_error};
use crate::clock::BrowserClock;
use crate::glitch::{FrameOutcome, GlitchConfig, Reveal};
use crate::{wasm_log, wasm_warn};

/// Marks spans that already have an engine attached
pub const ARMED_ATTR: &str = "data-glitch-armed";

type SharedReveal = Rc<RefCell<Reveal<DomRedaction, BrowserClock>>>;
type PointerListener = Closure<dyn FnMut(MouseEvent)>;

/// Handle returned by `attachGlitch`
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct GlitchHandle {
    armed: Option<Armed>,
}

struct Armed {
    element: HtmlElement,
    reveal: SharedReveal,
    frames: Rc<FrameLoop>,
    on_enter: PointerListener,
    on_leave: PointerListener,
}

#[wasm_bindgen]
impl GlitchHandle {
    /// Stop the animation, restore the text and detach listeners
    ///
    /// Safe to call any number of times.
    pub fn teardown(&mut self) {
        if let Some(armed) = self.armed.take() {
            armed.dispose();
        }
    }

    /// Whether this handle still controls an engine
    #[wasm_bindgen(js_name = isArmed)]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

impl Drop for GlitchHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl Armed {
    fn dispose(self) {
        self.frames.stop();
        self.reveal.borrow_mut().teardown();

        let target: &web_sys::EventTarget = &self.element;
        warn_on_dom_error(
            target.remove_event_listener_with_callback("mouseenter", self.on_enter.as_ref().unchecked_ref()),
            "remove mouseenter",
        );
        warn_on_dom_error(
            target.remove_event_listener_with_callback("mouseleave", self.on_leave.as_ref().unchecked_ref()),
            "remove mouseleave",
        );
        warn_on_dom_error(self.element.remove_attribute(ARMED_ATTR), "clear armed flag");
    }
}

impl std::fmt::Debug for Armed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Armed")
            .field("text", &self.reveal.borrow().original_text())
            .field("frames", &self.frames)
            .finish()
    }
}

/// Attach the glitch engine to a redacted span
///
/// `config` is an optional object with `duration`, `chars`, `preserveSpaces`
/// and `spread`; bad or missing values fall back to the defaults.
#[wasm_bindgen(js_name = attachGlitch)]
pub fn attach_glitch(element: HtmlElement, config: JsValue) -> GlitchHandle {
    let config = if is_absent(&config) {
        GlitchConfig::default()
    } else {
        deserialize::<GlitchConfig>(config, "Failed to read glitch config").unwrap_or_default()
    };
    attach(element, config)
}

/// Rust-side entry point used by the typewriter
///
/// Attaching to a span that already has an engine returns an inert handle.
pub fn attach(element: HtmlElement, config: GlitchConfig) -> GlitchHandle {
    if element.has_attribute(ARMED_ATTR) {
        wasm_log!("span already armed, skipping");
        return GlitchHandle::default();
    }

    let reveal: SharedReveal = Rc::new(RefCell::new(Reveal::new(
        DomRedaction::new(element.clone()),
        config,
        BrowserClock,
    )));

    let frames = Rc::new(FrameLoop::new({
        let reveal = Rc::clone(&reveal);
        move |_timestamp| reveal.borrow_mut().frame() == FrameOutcome::Continue
    }));

    let on_enter = Closure::wrap(Box::new({
        let reveal = Rc::clone(&reveal);
        let frames = Rc::clone(&frames);
        move |event: MouseEvent| {
            let needs_loop = reveal.borrow_mut().enter(f64::from(event.client_x()));
            if needs_loop {
                frames.start();
            }
        }
    }) as Box<dyn FnMut(MouseEvent)>);

    let on_leave = Closure::wrap(Box::new({
        let reveal = Rc::clone(&reveal);
        move |_event: MouseEvent| reveal.borrow_mut().leave()
    }) as Box<dyn FnMut(MouseEvent)>);

    let target: &web_sys::EventTarget = &element;
    let listening = warn_on_dom_error(
        target.add_event_listener_with_callback("mouseenter", on_enter.as_ref().unchecked_ref()),
        "add mouseenter",
    )
    .and_then(|_| {
        warn_on_dom_error(
            target.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref()),
            "add mouseleave",
        )
    });
    if listening.is_none() {
        wasm_warn!("glitch listeners not attached; span stays static");
    }

    warn_on_dom_error(element.set_attribute(ARMED_ATTR, ""), "set armed flag");

    GlitchHandle {
        armed: Some(Armed {
            element,
            reveal,
            frames,
            on_enter,
            on_leave,
        }),
    }
}
