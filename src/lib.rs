//! Redacted Dossier Viewer WASM Module
//!
//! Types leaked documents into the page one character at a time and scrambles
//! redacted spans with a glitch wave when the pointer touches them.
//!
//! The engines (`parse`, `typewriter`, `glitch`) are pure and render through
//! the traits in `text`; `api` binds them to the DOM and browser timers.

pub mod api;
pub mod clock;
pub mod error;
pub mod glitch;
pub mod models;
pub mod parse;
pub mod release;
pub mod text;
pub mod typewriter;

// Re-export commonly used types
pub use error::ViewerError;
pub use glitch::{GlitchConfig, Reveal};
pub use models::{ReleaseContent, Segment};
pub use typewriter::{TickOutcome, TypingSession};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    init_logging();
    log::info!("Dossier viewer WASM module initialized");
}

#[cfg(feature = "console_log")]
fn init_logging() {
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already initialized: {}", e).into());
    }
}

#[cfg(not(feature = "console_log"))]
fn init_logging() {}
