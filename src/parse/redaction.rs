//! Redaction marker parsing
//!
//! A document body is plain text with zero or more inline markers of the
//! form `[[REDACT:hidden text]]`. Markers do not nest and their content is
//! taken literally.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Segment;

/// Non-greedy so adjacent markers stay separate; `.` stops at newlines.
static REDACTION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[REDACT:(.*?)\]\]").expect("redaction marker pattern is valid"));

/// Split a body into text and redaction segments, in order
///
/// Empty literal runs are skipped, so `"[[REDACT:x]][[REDACT:y]]"` yields two
/// redactions with nothing between them, and `""` yields no segments.
pub fn parse_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in REDACTION_MARKER.captures_iter(text) {
        let (Some(marker), Some(hidden)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        if marker.start() > last {
            segments.push(Segment::text(&text[last..marker.start()]));
        }
        segments.push(Segment::redaction(hidden.as_str()));
        last = marker.end();
    }

    if last < text.len() {
        segments.push(Segment::text(&text[last..]));
    }

    segments
}

/// Replace every marker with its hidden text
pub fn strip_markers(text: &str) -> String {
    REDACTION_MARKER.replace_all(text, "$1").into_owned()
}

/// Escape text for insertion into HTML (element or attribute context)
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render a whole body as markup in one go
///
/// Text runs are escaped; each marker becomes a `span.redaction` carrying its
/// hidden text both as content and in `data-reveal`.
pub fn render_html(text: &str) -> String {
    parse_segments(text)
        .iter()
        .map(|segment| match segment {
            Segment::Text { text } => escape_html(text),
            Segment::Redaction { hidden } => {
                let hidden = escape_html(hidden);
                format!(
                    r#"<span class="redaction" data-reveal="{}">{}</span>"#,
                    hidden, hidden
                )
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concat(segments: &[Segment]) -> String {
        segments.iter().map(Segment::content).collect()
    }

    #[test]
    fn test_text_redaction_text() {
        assert_eq!(
            parse_segments("a[[REDACT:b]]c"),
            vec![Segment::text("a"), Segment::redaction("b"), Segment::text("c")]
        );
    }

    #[test]
    fn test_adjacent_redactions() {
        assert_eq!(
            parse_segments("[[REDACT:x]][[REDACT:y]]"),
            vec![Segment::redaction("x"), Segment::redaction("y")]
        );
    }

    #[test]
    fn test_no_markers() {
        assert_eq!(parse_segments("plain body"), vec![Segment::text("plain body")]);
        assert!(parse_segments("").is_empty());
    }

    #[test]
    fn test_empty_hidden_text() {
        assert_eq!(
            parse_segments("a[[REDACT:]]b"),
            vec![Segment::text("a"), Segment::redaction(""), Segment::text("b")]
        );
    }

    #[test]
    fn test_marker_content_is_opaque() {
        // The first `]]` closes the marker; the inner `[[REDACT:` is just text
        assert_eq!(
            parse_segments("[[REDACT:[[REDACT:x]]]]"),
            vec![Segment::redaction("[[REDACT:x"), Segment::text("]]")]
        );
    }

    #[test]
    fn test_unterminated_marker_is_text() {
        assert_eq!(
            parse_segments("see [[REDACT:oops"),
            vec![Segment::text("see [[REDACT:oops")]
        );
    }

    #[test]
    fn test_marker_does_not_span_lines() {
        let segments = parse_segments("[[REDACT:a\nb]]");
        assert_eq!(segments, vec![Segment::text("[[REDACT:a\nb]]")]);
    }

    #[test]
    fn test_round_trip_matches_stripped() {
        let bodies = [
            "",
            "no markers at all",
            "a[[REDACT:b]]c",
            "[[REDACT:x]][[REDACT:y]]",
            "Subject: [[REDACT:J. Doe]]\nLocation: [[REDACT:Site 4]] (confirmed)",
            "multi-byte: café [[REDACT:Zürich]] ✓",
            "[[REDACT:]] leading empty",
        ];
        for body in bodies {
            assert_eq!(concat(&parse_segments(body)), strip_markers(body), "body: {:?}", body);
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"a < b & "c" > d"#), "a &lt; b &amp; &quot;c&quot; &gt; d");
    }

    #[test]
    fn test_render_html() {
        assert_eq!(
            render_html("x<[[REDACT:a&b]]"),
            r#"x&lt;<span class="redaction" data-reveal="a&amp;b">a&amp;b</span>"#
        );
        assert_eq!(render_html("plain"), "plain");
    }
}
