//! Content description for a release
//!
//! Mirrors the JSON file the host page fetches. Only the fields the viewer
//! consumes are modeled; anything else in the file is ignored.

use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

/// Root of the content file
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseContent {
    /// Release timestamp, kept opaque (the countdown lives in the host page)
    #[serde(default)]
    pub release_at: Option<String>,

    #[serde(default)]
    pub documents: Vec<DocumentEntry>,
}

/// One leaked document
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEntry {
    #[serde(default)]
    pub filename: String,

    #[serde(default)]
    pub classification: String,

    /// Body text with `[[REDACT:...]]` markers
    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub image: Option<DocumentImage>,
}

/// Image shown above a document body
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DocumentImage {
    pub url: String,

    #[serde(default)]
    pub alt: Option<String>,

    #[serde(default)]
    pub caption: Option<String>,
}

/// Header data handed back to the host page for the current document
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentHeader {
    pub index: usize,
    pub filename: String,
    pub classification: String,
    pub has_image: bool,
    pub has_body: bool,
}

impl ReleaseContent {
    /// Parse the content file
    pub fn from_json(json: &str) -> Result<Self, ViewerError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn document(&self, index: usize) -> Result<&DocumentEntry, ViewerError> {
        self.documents.get(index).ok_or(ViewerError::DocumentOutOfRange {
            index,
            count: self.documents.len(),
        })
    }
}

impl DocumentEntry {
    /// The body if it has anything to type
    pub fn typed_body(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.is_empty())
    }

    pub fn header(&self, index: usize) -> DocumentHeader {
        DocumentHeader {
            index,
            filename: self.filename.clone(),
            classification: self.classification.clone(),
            has_image: self.image.is_some(),
            has_body: self.typed_body().is_some(),
        }
    }
}
