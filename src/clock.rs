//! Time sources for the animation engines
//!
//! Timestamps are milliseconds as `f64`, the unit `performance.now()` and
//! `Date.now()` report in. Engines take the time from a [`Clock`] so tests can
//! drive them without a real frame clock.

use std::cell::Cell;
use std::rc::Rc;

/// Milliseconds since an arbitrary origin
pub type Millis = f64;

/// A source of the current time
pub trait Clock {
    fn now(&self) -> Millis;
}

/// Browser clock backed by `performance.now()`
///
/// Falls back to `Date.now()` when the page has no `Performance` object.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now(&self) -> Millis {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }
}

/// Hand-driven clock; clones share the same time
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Millis>>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, t: Millis) {
        self.now.set(t);
    }

    pub fn advance(&self, by: Millis) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}
