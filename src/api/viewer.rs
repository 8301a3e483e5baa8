//! Document viewer: the host session
//!
//! Owns the parsed content description, the release position and the
//! typewriter. Showing a document always tears the previous one down first,
//! so no timer or frame callback outlives the view it was made for.

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::api::dom::{is_typing_target, DomSink};
use crate::api::helpers::{serialize, to_js_error};
use crate::api::typewriter::Typewriter;
use crate::error::ViewerError;
use crate::models::ReleaseContent;
use crate::release::{ReleaseState, ReleaseStep};
use crate::{wasm_info, wasm_warn};

/// Markup shown once every document has been viewed
pub const END_OF_RELEASE_HTML: &str =
    r#"<p style="text-align: center; color: #7a7f87; padding: 60px 0;">End of release.</p>"#;

#[wasm_bindgen]
pub struct DocumentViewer {
    container: HtmlElement,
    content: ReleaseContent,
    release: ReleaseState,
    typewriter: Typewriter,
}

#[wasm_bindgen]
impl DocumentViewer {
    /// Parse the content file and bind to the document body container
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement, content_json: &str) -> Result<DocumentViewer, JsValue> {
        let content = ReleaseContent::from_json(content_json).map_err(to_js_error)?;
        wasm_info!("release loaded with {} documents", content.document_count());

        Ok(DocumentViewer {
            container,
            release: ReleaseState::new(content.document_count()),
            content,
            typewriter: Typewriter::new(),
        })
    }

    /// Show document `index`
    ///
    /// Returns the document header (`index`, `filename`, `classification`,
    /// `hasImage`, `hasBody`), or `null` once the release has ended or while
    /// another typewriter is typing into the container.
    pub fn show(&mut self, index: usize) -> Result<JsValue, JsValue> {
        if !self.claim() {
            return Ok(JsValue::NULL);
        }
        let step = self.release.show(index);
        self.render(step)
    }

    /// Show the document after the current one (the first if none yet)
    pub fn next(&mut self) -> Result<JsValue, JsValue> {
        if !self.claim() {
            return Ok(JsValue::NULL);
        }
        let step = self.release.next();
        self.render(step)
    }

    /// Finish typing the current document at once
    pub fn skip(&self) {
        self.typewriter.skip();
    }

    #[wasm_bindgen(js_name = currentDocument)]
    pub fn current_document(&self) -> Result<JsValue, JsValue> {
        match self.release.current() {
            Some(index) if !self.release.is_ended() => {
                let doc = self.content.document(index).map_err(to_js_error)?;
                serialize(&doc.header(index), "Failed to serialize document header")
            }
            _ => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = documentCount)]
    pub fn document_count(&self) -> usize {
        self.content.document_count()
    }

    #[wasm_bindgen(js_name = isEnded)]
    pub fn is_ended(&self) -> bool {
        self.release.is_ended()
    }

    #[wasm_bindgen(js_name = isTyping)]
    pub fn is_typing(&self) -> bool {
        self.typewriter.is_running()
    }

    /// See `Typewriter.onComplete`
    #[wasm_bindgen(js_name = onComplete)]
    pub fn on_complete(&self, callback: js_sys::Function) {
        self.typewriter.on_complete(callback);
    }

    /// See `Typewriter.onKeystroke`
    #[wasm_bindgen(js_name = onKeystroke)]
    pub fn on_keystroke(&self, callback: js_sys::Function) {
        self.typewriter.on_keystroke(callback);
    }

    /// Stop typing and release every span engine
    pub fn teardown(&self) {
        self.typewriter.teardown();
    }
}

impl DocumentViewer {
    /// Stop our own session; `false` if a foreign one still owns the container
    fn claim(&self) -> bool {
        self.typewriter.teardown();
        if is_typing_target(&self.container) {
            wasm_warn!("document container is busy, viewer left it alone");
            return false;
        }
        true
    }

    fn render(&mut self, step: ReleaseStep) -> Result<JsValue, JsValue> {
        self.container.set_inner_html("");

        match step {
            ReleaseStep::Show(index) => {
                self.render_document(index).map_err(to_js_error)?;
                self.current_document()
            }
            ReleaseStep::End => {
                wasm_info!("end of release");
                self.container.set_inner_html(END_OF_RELEASE_HTML);
                Ok(JsValue::NULL)
            }
        }
    }

    fn render_document(&self, index: usize) -> Result<(), ViewerError> {
        let doc = self.content.document(index)?;
        wasm_info!("showing document {} ({})", index, doc.filename);

        let mut sink = DomSink::new(self.container.clone())?;
        if let Some(image) = &doc.image {
            sink.append_image(image)?;
        }
        self.typewriter.begin(sink, doc.typed_body())?;
        Ok(())
    }
}
