//! Rendering targets for the engines
//!
//! The typewriter writes into a [`TextSink`] and the glitch engine into a
//! [`RedactionSurface`]. The browser implementations live in `api::dom`; the
//! in-memory ones in `text::memory` back the headless tests.

/// Where a typing session renders its output
///
/// Implementations keep a trailing cursor glyph as the last child from
/// [`begin`](TextSink::begin) until [`remove_cursor`](TextSink::remove_cursor).
pub trait TextSink {
    /// Handle to a redacted span created by the sink
    type Redaction;

    /// Clear earlier content and insert the trailing cursor glyph
    ///
    /// Content the sink was told to preserve (a document image) stays.
    fn begin(&mut self);

    /// Insert one character immediately before the cursor glyph
    fn append_char(&mut self, ch: char);

    /// Insert a whole redacted span immediately before the cursor glyph
    ///
    /// `None` if the span could not be created; the text is then lost from
    /// the rendering but typing continues.
    fn append_redaction(&mut self, hidden: &str) -> Option<Self::Redaction>;

    /// Drop everything typed so far and render the full body at once
    ///
    /// Returns the redacted spans the instant render created.
    fn render_all(&mut self, body: &str) -> Vec<Self::Redaction>;

    /// Scroll so the cursor glyph is visible
    fn reveal_cursor(&mut self);

    /// Remove the cursor glyph; no-op if it is already gone
    fn remove_cursor(&mut self);
}

/// Horizontal geometry of a rendered span, in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub width: f64,
}

impl Bounds {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Usable for cursor mapping and width locking
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.width > 0.0 && self.left.is_finite()
    }
}

/// A redacted span the glitch engine animates
pub trait RedactionSurface {
    /// Text to reveal: the `data-reveal` value if present, else the content
    fn original_text(&self) -> String;

    /// Current geometry, if the span is laid out
    fn bounds(&self) -> Option<Bounds>;

    fn set_text(&mut self, text: &str);

    /// Toggle the "animating" visual state
    fn set_active(&mut self, active: bool);

    /// Pin the rendered width so glyph swaps do not reflow the line
    fn lock_width(&mut self, width: f64);

    /// Undo [`lock_width`](RedactionSurface::lock_width)
    fn release_width(&mut self);
}
