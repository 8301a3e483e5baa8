//! DOM implementations of the rendering traits
//!
//! `DomSink` types into a container element; `DomRedaction` is one
//! `span.redaction` the glitch engine animates.

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, Node, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use crate::api::helpers::warn_on_dom_error;
use crate::error::ViewerError;
use crate::models::DocumentImage;
use crate::parse::render_html;
use crate::text::{Bounds, RedactionSurface, TextSink};

pub const REDACTION_CLASS: &str = "redaction";
pub const REVEAL_ATTR: &str = "data-reveal";
pub const ACTIVE_CLASS: &str = "ascii-active";
pub const CURSOR_CLASS: &str = "typing-cursor";
/// Set on a container while a typing session owns it
pub const TYPING_ATTR: &str = "data-typing";

/// Whether some typing session currently owns `container`
pub fn is_typing_target(container: &Element) -> bool {
    container.has_attribute(TYPING_ATTR)
}

/// Types a document body into a container element
#[derive(Debug)]
pub struct DomSink {
    container: HtmlElement,
    document: Document,
    cursor: Option<Element>,
    /// Kept when the body is cleared or re-rendered (the document image)
    preserved: Option<Element>,
}

impl DomSink {
    pub fn new(container: HtmlElement) -> Result<Self, ViewerError> {
        let document = container
            .owner_document()
            .ok_or_else(|| ViewerError::Dom("container is not attached to a document".into()))?;

        Ok(Self {
            container,
            document,
            cursor: None,
            preserved: None,
        })
    }

    pub fn is_busy(&self) -> bool {
        is_typing_target(&self.container)
    }

    /// Claim or release the container for a typing session
    pub fn set_busy(&self, busy: bool) {
        let result = if busy {
            self.container.set_attribute(TYPING_ATTR, "")
        } else {
            self.container.remove_attribute(TYPING_ATTR)
        };
        warn_on_dom_error(result, "toggle typing flag");
    }

    /// Keep `element` at the top of the container across an instant render
    pub fn preserve(&mut self, element: Element) {
        self.preserved = Some(element);
    }

    /// Append `div > img.document-image + div.document-image-caption`
    pub fn append_image(&mut self, image: &DocumentImage) -> Result<(), ViewerError> {
        let block = self.create("div")?;
        let img = self.create("img")?;
        img.set_class_name("document-image");
        img.set_attribute("src", &image.url)
            .map_err(|e| ViewerError::dom("set image src", &e))?;
        img.set_attribute("alt", image.alt.as_deref().unwrap_or(""))
            .map_err(|e| ViewerError::dom("set image alt", &e))?;
        block
            .append_child(&img)
            .map_err(|e| ViewerError::dom("append image", &e))?;

        if let Some(caption) = &image.caption {
            let caption_el = self.create("div")?;
            caption_el.set_class_name("document-image-caption");
            caption_el.set_text_content(Some(caption));
            block
                .append_child(&caption_el)
                .map_err(|e| ViewerError::dom("append caption", &e))?;
        }

        self.container
            .append_child(&block)
            .map_err(|e| ViewerError::dom("append image block", &e))?;
        self.preserve(block);
        Ok(())
    }

    fn create(&self, tag: &str) -> Result<Element, ViewerError> {
        self.document
            .create_element(tag)
            .map_err(|e| ViewerError::dom(&format!("create <{}>", tag), &e))
    }

    /// Empty the container down to the preserved block
    fn clear(&mut self) {
        self.container.set_inner_html("");
        self.cursor = None;
        if let Some(preserved) = &self.preserved {
            warn_on_dom_error(self.container.append_child(preserved), "restore preserved block");
        }
    }

    /// Insert before the cursor glyph, or at the end if there is none
    fn insert(&self, node: &Node) {
        let result = match &self.cursor {
            Some(cursor) => {
                let anchor: &Node = cursor;
                self.container.insert_before(node, Some(anchor))
            }
            None => self.container.append_child(node),
        };
        warn_on_dom_error(result, "insert typed node");
    }
}

impl TextSink for DomSink {
    type Redaction = HtmlElement;

    fn begin(&mut self) {
        self.clear();
        let Some(cursor) = warn_on_dom_error(self.document.create_element("span"), "create cursor") else {
            return;
        };
        cursor.set_class_name(CURSOR_CLASS);
        if warn_on_dom_error(self.container.append_child(&cursor), "append cursor").is_some() {
            self.cursor = Some(cursor);
        }
    }

    fn append_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        let text = self.document.create_text_node(ch.encode_utf8(&mut buf));
        self.insert(&text);
    }

    fn append_redaction(&mut self, hidden: &str) -> Option<HtmlElement> {
        let span = warn_on_dom_error(self.document.create_element("span"), "create redaction")?
            .dyn_into::<HtmlElement>()
            .ok()?;
        span.set_class_name(REDACTION_CLASS);
        warn_on_dom_error(span.set_attribute(REVEAL_ATTR, hidden), "set data-reveal");
        span.set_text_content(Some(hidden));
        self.insert(&span);
        Some(span)
    }

    fn render_all(&mut self, body: &str) -> Vec<HtmlElement> {
        self.clear();
        warn_on_dom_error(
            self.container.insert_adjacent_html("beforeend", &render_html(body)),
            "render body",
        );

        let Some(spans) = warn_on_dom_error(
            self.container.query_selector_all(&format!(".{}", REDACTION_CLASS)),
            "collect redactions",
        ) else {
            return Vec::new();
        };

        (0..spans.length())
            .filter_map(|i| spans.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn reveal_cursor(&mut self) {
        if let Some(cursor) = &self.cursor {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::End);
            cursor.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn remove_cursor(&mut self) {
        if let Some(cursor) = self.cursor.take() {
            cursor.remove();
        }
    }
}

/// A `span.redaction` in the page
#[derive(Debug, Clone)]
pub struct DomRedaction {
    element: HtmlElement,
}

impl DomRedaction {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }
}

impl RedactionSurface for DomRedaction {
    fn original_text(&self) -> String {
        self.element
            .get_attribute(REVEAL_ATTR)
            .or_else(|| self.element.text_content())
            .unwrap_or_default()
    }

    fn bounds(&self) -> Option<Bounds> {
        let rect = self.element.get_bounding_client_rect();
        Some(Bounds::new(rect.left(), rect.width()))
    }

    fn set_text(&mut self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn set_active(&mut self, active: bool) {
        let classes = self.element.class_list();
        let result = if active {
            classes.add_1(ACTIVE_CLASS)
        } else {
            classes.remove_1(ACTIVE_CLASS)
        };
        warn_on_dom_error(result, "toggle active class");
    }

    fn lock_width(&mut self, width: f64) {
        warn_on_dom_error(
            self.element.style().set_property("width", &format!("{}px", width)),
            "lock width",
        );
    }

    fn release_width(&mut self) {
        warn_on_dom_error(self.element.style().remove_property("width"), "release width");
    }
}
