//! `setInterval` / `setTimeout` wrappers

use std::cell::Cell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

use crate::error::ViewerError;

/// A repeating timer; cleared on [`cancel`](IntervalTimer::cancel) or drop
pub struct IntervalTimer {
    handle: Cell<Option<i32>>,
    _closure: Closure<dyn FnMut()>,
}

impl IntervalTimer {
    pub fn start(period_ms: i32, tick: impl FnMut() + 'static) -> Result<Self, ViewerError> {
        let window = web_sys::window().ok_or_else(|| ViewerError::Dom("no window".into()))?;
        let closure = Closure::wrap(Box::new(tick) as Box<dyn FnMut()>);
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms,
            )
            .map_err(|e| ViewerError::dom("setInterval", &e))?;

        Ok(Self {
            handle: Cell::new(Some(handle)),
            _closure: closure,
        })
    }

    /// Stop ticking; the closure stays alive until the timer is dropped
    pub fn cancel(&self) {
        if let Some(handle) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }
}

impl Drop for IntervalTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Run `f` once on the next macrotask
///
/// Falls back to calling it immediately when there is no window.
pub fn defer(f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        f();
        return;
    };
    let callback: JsValue = Closure::once_into_js(f);
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0) {
        crate::wasm_warn!("{}", ViewerError::dom("setTimeout", &e));
    }
}
