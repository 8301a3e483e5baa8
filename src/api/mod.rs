//! Dossier viewer WASM API
//!
//! JavaScript-facing bindings over the engines. Everything that touches the
//! DOM or browser timers lives here; the engines themselves are pure.
//!
//! # Module Structure
//!
//! - `helpers`: logging macros, serialization and error conversion
//! - `dom`: `TextSink` / `RedactionSurface` over real elements
//! - `frames`, `timer`: `requestAnimationFrame` and `setInterval` plumbing
//! - `glitch`: `attachGlitch` and `GlitchHandle`
//! - `typewriter`: the `Typewriter` class
//! - `viewer`: the `DocumentViewer` host session
//! - `segments`: parser functions for host scripts

pub mod helpers;
pub mod dom;
pub mod frames;
pub mod timer;
pub mod glitch;
pub mod typewriter;
pub mod viewer;
pub mod segments;

pub use glitch::{attach_glitch, GlitchHandle};
pub use typewriter::Typewriter;
pub use viewer::DocumentViewer;
pub use segments::{parse_segments, render_redactions, strip_redactions};
