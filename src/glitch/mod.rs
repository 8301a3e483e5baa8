//! Glitch reveal engine
//!
//! Hovering a redacted span sends a wave of decoy glyphs across it. The
//! engine is split into:
//!
//! - `config`: per-span settings (duration, alphabet, spread)
//! - `wave`: pure wave math, evaluated per character
//! - `reveal`: the Idle/Animating state machine that owns a span

pub mod config;
pub mod reveal;
pub mod wave;

pub use config::{GlitchConfig, DEFAULT_CHARS};
pub use reveal::{FrameOutcome, Reveal, RevealPhase};
pub use wave::{evaluate_char, scramble, CharEffect, Wave};
