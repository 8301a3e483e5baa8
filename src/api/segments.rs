//! Parser bindings for host scripts

use wasm_bindgen::prelude::*;

use crate::api::helpers::serialize;
use crate::parse;

/// Split a body into `{ type: "text", text }` / `{ type: "redaction", hidden }`
#[wasm_bindgen(js_name = parseSegments)]
pub fn parse_segments(text: &str) -> Result<JsValue, JsValue> {
    serialize(&parse::parse_segments(text), "Failed to serialize segments")
}

/// Escaped markup with each marker turned into a `span.redaction`
#[wasm_bindgen(js_name = renderRedactions)]
pub fn render_redactions(text: &str) -> String {
    parse::render_html(text)
}

/// The body with every marker replaced by its hidden text
#[wasm_bindgen(js_name = stripRedactions)]
pub fn strip_redactions(text: &str) -> String {
    parse::strip_markers(text)
}
