//! Parsed units of a document body

use serde::{Deserialize, Serialize};

/// A parsed piece of a document body: literal text or a redacted run
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    /// Literal text, revealed one character per tick
    Text { text: String },
    /// Hidden text, rendered as one atomic redacted span
    Redaction { hidden: String },
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text { text: text.into() }
    }

    pub fn redaction(hidden: impl Into<String>) -> Self {
        Segment::Redaction { hidden: hidden.into() }
    }

    /// The characters this segment contributes to the marker-free body
    pub fn content(&self) -> &str {
        match self {
            Segment::Text { text } => text,
            Segment::Redaction { hidden } => hidden,
        }
    }

    pub fn is_redaction(&self) -> bool {
        matches!(self, Segment::Redaction { .. })
    }
}
