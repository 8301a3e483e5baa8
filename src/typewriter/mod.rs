//! Typewriter engine
//!
//! Reveals a document body one character per tick, inserting redactions as
//! whole spans. See `session` for the state machine.

pub mod session;

pub use session::{SkipOutcome, TickOutcome, TypingPhase, TypingSession, TICK_INTERVAL_MS};
