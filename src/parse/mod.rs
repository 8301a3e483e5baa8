//! Parsing module for the dossier viewer
//!
//! Turns raw document bodies into ordered segments and instant-render markup.

pub mod redaction;

pub use redaction::*;
