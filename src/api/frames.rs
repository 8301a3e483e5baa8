//! `requestAnimationFrame` loop
//!
//! [`FrameLoop`] calls its callback once per display frame with the
//! `DOMHighResTimeStamp` of the frame, re-registering itself for as long as
//! the callback returns `true`. One JS closure is created up front and reused
//! for every frame and every restart.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

type FrameClosure = Closure<dyn FnMut(f64)>;
type FrameCallback = Box<dyn FnMut(f64) -> bool>;

pub struct FrameLoop {
    inner: Rc<FrameInner>,
}

struct FrameInner {
    /// Holds only a weak reference back to `FrameInner`, so no cycle
    closure: FrameClosure,
    callback: RefCell<FrameCallback>,
    running: Cell<bool>,
    /// ID of the pending `requestAnimationFrame`, if any
    raf_id: Cell<Option<i32>>,
}

impl FrameLoop {
    /// Create a loop that is not yet running
    pub fn new(callback: impl FnMut(f64) -> bool + 'static) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<FrameInner>| {
            let weak = weak.clone();
            let closure = Closure::wrap(Box::new(move |timestamp: f64| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_frame(timestamp);
                }
            }) as Box<dyn FnMut(f64)>);

            FrameInner {
                closure,
                callback: RefCell::new(Box::new(callback)),
                running: Cell::new(false),
                raf_id: Cell::new(None),
            }
        });

        Self { inner }
    }

    /// Start requesting frames; no-op if already running
    pub fn start(&self) {
        if self.inner.running.get() {
            return;
        }
        self.inner.running.set(true);
        self.inner.request();
    }

    /// Stop and cancel the pending frame; safe to call repeatedly
    pub fn stop(&self) {
        self.inner.running.set(false);
        if let Some(id) = self.inner.raf_id.take() {
            cancel_animation_frame(id);
        }
    }
}

impl FrameInner {
    fn request(&self) {
        let id = request_animation_frame(self.closure.as_ref().unchecked_ref());
        self.raf_id.set(Some(id));
    }

    fn on_frame(&self, timestamp: f64) {
        self.raf_id.set(None);
        if !self.running.get() {
            return;
        }

        let keep_going = match self.callback.try_borrow_mut() {
            Ok(mut callback) => callback(timestamp),
            // Re-entered from inside the callback; skip this frame
            Err(_) => true,
        };

        if keep_going && self.running.get() {
            self.request();
        } else {
            self.running.set(false);
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameLoop")
            .field("running", &self.inner.running.get())
            .field("raf_id", &self.inner.raf_id.get())
            .finish()
    }
}
