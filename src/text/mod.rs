//! Text rendering layer
//!
//! The engines never touch the DOM directly; they write through the traits
//! in `sink`. The browser implementations live in `api::dom`.
//!
//! ## Modules
//!
//! - `sink`: `TextSink` and `RedactionSurface` traits
//! - `cursor`: read position of a typing session
//! - `memory`: in-memory implementations for headless use

pub mod cursor;
pub mod memory;
pub mod sink;

// Re-exports for convenience
pub use cursor::TypingCursor;
pub use memory::{MemorySink, MemorySpan, Node};
pub use sink::{Bounds, RedactionSurface, TextSink};
