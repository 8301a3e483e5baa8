//! In-memory sink and span
//!
//! Headless stand-ins for the DOM. Adjacent text is merged into one node, so
//! a body typed character by character and the same body rendered at once
//! produce identical node lists. The cursor glyph is a node of its own and
//! new content goes in front of it.

use super::sink::{Bounds, RedactionSurface, TextSink};
use crate::models::Segment;
use crate::parse::parse_segments;

/// A rendered child of a [`MemorySink`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Redaction(String),
    Cursor,
}

/// Records what a typing session rendered
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    nodes: Vec<Node>,
    scrolls: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that already shows `text`, like a container reused from an
    /// earlier document
    pub fn with_text(text: &str) -> Self {
        Self {
            nodes: vec![Node::Text(text.to_string())],
            scrolls: 0,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn has_cursor(&self) -> bool {
        self.nodes.contains(&Node::Cursor)
    }

    /// Number of times the cursor was scrolled into view
    pub fn scroll_count(&self) -> usize {
        self.scrolls
    }

    /// Plain text outside redactions
    pub fn visible_text(&self) -> String {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Hidden values of every redacted span, in order
    pub fn redactions(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Redaction(h) => Some(h.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Index new content goes to: the cursor's slot, or the end
    fn insertion_point(&self) -> usize {
        self.nodes
            .iter()
            .position(|n| *n == Node::Cursor)
            .unwrap_or(self.nodes.len())
    }

    fn push_text(&mut self, text: &str) {
        let at = self.insertion_point();
        match at.checked_sub(1).and_then(|i| self.nodes.get_mut(i)) {
            Some(Node::Text(last)) => last.push_str(text),
            _ => self.nodes.insert(at, Node::Text(text.to_string())),
        }
    }

    fn push_redaction(&mut self, hidden: &str) {
        let at = self.insertion_point();
        self.nodes.insert(at, Node::Redaction(hidden.to_string()));
    }
}

impl TextSink for MemorySink {
    type Redaction = MemorySpan;

    fn begin(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::Cursor);
    }

    fn append_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.push_text(ch.encode_utf8(&mut buf));
    }

    fn append_redaction(&mut self, hidden: &str) -> Option<MemorySpan> {
        self.push_redaction(hidden);
        Some(MemorySpan::new(hidden))
    }

    fn render_all(&mut self, body: &str) -> Vec<MemorySpan> {
        self.nodes.clear();
        let mut spans = Vec::new();
        for segment in parse_segments(body) {
            match segment {
                Segment::Text { text } => self.push_text(&text),
                Segment::Redaction { hidden } => {
                    spans.push(MemorySpan::new(&hidden));
                    self.push_redaction(&hidden);
                }
            }
        }
        spans
    }

    fn reveal_cursor(&mut self) {
        self.scrolls += 1;
    }

    fn remove_cursor(&mut self) {
        self.nodes.retain(|n| *n != Node::Cursor);
    }
}

/// A redacted span with no layout engine behind it
#[derive(Clone, Debug, PartialEq)]
pub struct MemorySpan {
    original: String,
    text: String,
    active: bool,
    locked_width: Option<f64>,
    bounds: Option<Bounds>,
    renders: usize,
}

impl MemorySpan {
    pub fn new(text: &str) -> Self {
        Self {
            original: text.to_string(),
            text: text.to_string(),
            active: false,
            locked_width: None,
            bounds: None,
            renders: 0,
        }
    }

    /// Give the span a layout box
    pub fn with_bounds(mut self, left: f64, width: f64) -> Self {
        self.bounds = Some(Bounds::new(left, width));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn locked_width(&self) -> Option<f64> {
        self.locked_width
    }

    /// How many times the text was written
    pub fn render_count(&self) -> usize {
        self.renders
    }
}

impl RedactionSurface for MemorySpan {
    fn original_text(&self) -> String {
        self.original.clone()
    }

    fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.renders += 1;
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn lock_width(&mut self, width: f64) {
        self.locked_width = Some(width);
    }

    fn release_width(&mut self) {
        self.locked_width = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chars_merge_into_one_text_node() {
        let mut sink = MemorySink::new();
        sink.append_char('h');
        sink.append_char('i');
        sink.append_redaction("x");
        sink.append_char('!');
        assert_eq!(
            sink.nodes(),
            &[
                Node::Text("hi".into()),
                Node::Redaction("x".into()),
                Node::Text("!".into())
            ]
        );
    }

    #[test]
    fn test_content_goes_before_cursor() {
        let mut sink = MemorySink::with_text("old");
        sink.begin();
        assert_eq!(sink.nodes(), &[Node::Cursor]);

        sink.append_char('a');
        sink.append_redaction("b");
        sink.append_char('c');
        assert_eq!(
            sink.nodes(),
            &[
                Node::Text("a".into()),
                Node::Redaction("b".into()),
                Node::Text("c".into()),
                Node::Cursor
            ]
        );

        sink.remove_cursor();
        assert!(!sink.has_cursor());
        assert_eq!(sink.visible_text(), "ac");
    }

    #[test]
    fn test_render_all_replaces_nodes() {
        let mut sink = MemorySink::new();
        sink.append_char('z');
        let spans = sink.render_all("a[[REDACT:b]]c");
        assert_eq!(sink.visible_text(), "ac");
        assert_eq!(sink.redactions(), vec!["b"]);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text(), "b");
    }
}
