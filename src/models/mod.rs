//! Data models for the dossier viewer
//!
//! - `segment`: parsed pieces of a document body
//! - `content`: the release content description loaded by the host page

pub mod content;
pub mod segment;

pub use content::{DocumentEntry, DocumentHeader, DocumentImage, ReleaseContent};
pub use segment::Segment;
