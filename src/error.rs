//! Error types for the dossier viewer
//!
//! Most presentation failures are silent no-ops; the variants here cover the
//! operations that can genuinely fail (content parsing, configuration, DOM calls).

use thiserror::Error;

/// Top-level viewer error type
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Content description is not valid JSON or has the wrong shape
    #[error("Invalid content description: {0}")]
    InvalidContent(#[from] serde_json::Error),

    /// A document index past the end of the release
    #[error("Document {index} out of range (count: {count})")]
    DocumentOutOfRange { index: usize, count: usize },

    /// Glitch configuration that would make the wave math degenerate
    #[error("Invalid glitch config: {0}")]
    InvalidConfig(String),

    /// A DOM call failed
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl ViewerError {
    /// Build a `Dom` error from a JS exception value
    pub fn dom(context: &str, value: &wasm_bindgen::JsValue) -> Self {
        let detail = value.as_string().unwrap_or_else(|| format!("{:?}", value));
        ViewerError::Dom(format!("{}: {}", context, detail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = ViewerError::DocumentOutOfRange { index: 4, count: 3 };
        assert_eq!(err.to_string(), "Document 4 out of range (count: 3)");
    }

    #[test]
    fn test_content_error_from_serde() {
        let err: ViewerError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("Invalid content description"));
    }
}
