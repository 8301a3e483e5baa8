//! Typewriter bindings
//!
//! A container hosts at most one typing session at a time, whichever
//! `Typewriter` runs it; the session marks the container while it is active.
//! Ticks come from
//! a `setInterval` timer; every redacted span gets a glitch engine as soon as
//! it appears, including the ones an instant render (skip) creates.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::api::dom::{is_typing_target, DomSink};
use crate::api::glitch::{attach, GlitchHandle};
use crate::api::helpers::to_js_error;
use crate::api::timer::{defer, IntervalTimer};
use crate::glitch::GlitchConfig;
use crate::text::TextSink;
use crate::typewriter::{TickOutcome, TypingSession, TICK_INTERVAL_MS};
use crate::{wasm_log, wasm_warn};

#[wasm_bindgen]
#[derive(Default)]
pub struct Typewriter {
    inner: Rc<TypewriterInner>,
}

#[derive(Default)]
struct TypewriterInner {
    session: RefCell<Option<TypingSession>>,
    sink: RefCell<Option<DomSink>>,
    timer: RefCell<Option<IntervalTimer>>,
    spans: RefCell<Vec<GlitchHandle>>,
    on_complete: RefCell<Option<js_sys::Function>>,
    on_keystroke: RefCell<Option<js_sys::Function>>,
}

#[wasm_bindgen]
impl Typewriter {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Typewriter {
        Typewriter::default()
    }

    /// Start typing `body` into `container`
    ///
    /// Returns `false` without doing anything when the container is missing or
    /// a session (from any typewriter) is already typing into it. A missing or
    /// empty body completes immediately.
    pub fn start(&self, container: Option<HtmlElement>, body: Option<String>) -> Result<bool, JsValue> {
        let Some(container) = container else {
            wasm_warn!("typewriter start without a container");
            return Ok(false);
        };
        if self.is_running() || is_typing_target(&container) {
            wasm_log!("container already being typed into, start ignored");
            return Ok(false);
        }
        let sink = DomSink::new(container).map_err(to_js_error)?;
        self.begin(sink, body.as_deref()).map_err(to_js_error)
    }

    /// Jump to the end of the current document
    pub fn skip(&self) {
        self.inner.skip();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    /// Called with `hadText: boolean` when a session completes or is skipped
    #[wasm_bindgen(js_name = onComplete)]
    pub fn on_complete(&self, callback: js_sys::Function) {
        *self.inner.on_complete.borrow_mut() = Some(callback);
    }

    /// Called with each non-whitespace character as it is typed
    #[wasm_bindgen(js_name = onKeystroke)]
    pub fn on_keystroke(&self, callback: js_sys::Function) {
        *self.inner.on_keystroke.borrow_mut() = Some(callback);
    }

    /// Stop typing and tear down every glitch engine this typewriter armed
    pub fn teardown(&self) {
        self.inner.reset();
    }
}

impl Typewriter {
    /// Start a session on a prepared sink
    ///
    /// This typewriter's previous session is torn down first. Returns
    /// `false` if another typewriter still owns the sink's container.
    pub fn begin(&self, mut sink: DomSink, body: Option<&str>) -> Result<bool, crate::error::ViewerError> {
        self.inner.reset();
        if sink.is_busy() {
            wasm_warn!("container is owned by another typing session");
            return Ok(false);
        }

        let Some(body) = body.filter(|b| !b.is_empty()) else {
            self.inner.notify_complete(false);
            return Ok(true);
        };

        sink.set_busy(true);
        let session = TypingSession::start(body, &mut sink);
        *self.inner.session.borrow_mut() = Some(session);
        *self.inner.sink.borrow_mut() = Some(sink);

        let weak: Weak<TypewriterInner> = Rc::downgrade(&self.inner);
        let timer = IntervalTimer::start(TICK_INTERVAL_MS, move || {
            if let Some(inner) = weak.upgrade() {
                inner.tick();
            }
        });
        match timer {
            Ok(timer) => {
                *self.inner.timer.borrow_mut() = Some(timer);
                Ok(true)
            }
            Err(e) => {
                self.inner.reset();
                Err(e)
            }
        }
    }
}

impl TypewriterInner {
    fn is_running(&self) -> bool {
        self.session
            .borrow()
            .as_ref()
            .is_some_and(|s| !s.is_finished())
    }

    fn tick(&self) {
        let outcome = {
            let mut session = self.session.borrow_mut();
            let mut sink = self.sink.borrow_mut();
            match (session.as_mut(), sink.as_mut()) {
                (Some(session), Some(sink)) => session.tick(sink),
                _ => return,
            }
        };

        match outcome {
            TickOutcome::Typed(ch) => {
                if !ch.is_whitespace() {
                    self.notify_keystroke(ch);
                }
            }
            TickOutcome::Redacted(Some(span)) => self.arm(span),
            TickOutcome::Redacted(None) | TickOutcome::Advanced | TickOutcome::Idle => {}
            TickOutcome::Finished { had_text } => self.finish(Vec::new(), had_text),
        }
    }

    fn skip(&self) {
        let outcome = {
            let mut session = self.session.borrow_mut();
            let mut sink = self.sink.borrow_mut();
            match (session.as_mut(), sink.as_mut()) {
                (Some(session), Some(sink)) => session.skip(sink),
                _ => None,
            }
        };

        match outcome {
            Some(outcome) => {
                // The instant render replaced the spans the ticks created
                self.spans.borrow_mut().clear();
                self.finish(outcome.spans, outcome.had_text);
            }
            None => wasm_log!("skip ignored, nothing is typing"),
        }
    }

    fn finish(&self, spans: Vec<HtmlElement>, had_text: bool) {
        if let Some(timer) = self.timer.borrow().as_ref() {
            timer.cancel();
        }
        if let Some(sink) = self.sink.borrow().as_ref() {
            sink.set_busy(false);
        }
        for span in spans {
            self.arm(span);
        }
        self.notify_complete(had_text);
    }

    fn arm(&self, span: HtmlElement) {
        if span.text_content().unwrap_or_default().trim().is_empty() {
            return;
        }
        let handle = attach(span, GlitchConfig::redaction());
        if handle.is_armed() {
            self.spans.borrow_mut().push(handle);
        }
    }

    fn reset(&self) {
        if let Some(timer) = self.timer.borrow_mut().take() {
            timer.cancel();
        }
        if let Some(mut sink) = self.sink.borrow_mut().take() {
            sink.remove_cursor();
            sink.set_busy(false);
        }
        self.session.borrow_mut().take();
        self.spans.borrow_mut().clear();
    }

    fn notify_keystroke(&self, ch: char) {
        if let Some(callback) = self.on_keystroke.borrow().as_ref() {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&ch.to_string())) {
                wasm_warn!("keystroke callback failed: {:?}", e.as_string());
            }
        }
    }

    /// Deliver completion on the next macrotask
    fn notify_complete(&self, had_text: bool) {
        wasm_log!("typing complete (had_text: {})", had_text);
        let Some(callback) = self.on_complete.borrow().clone() else {
            return;
        };
        defer(move || {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_bool(had_text)) {
                wasm_warn!("completion callback failed: {:?}", e.as_string());
            }
        });
    }
}
