//! Typing session state machine
//!
//! A session owns the parsed segments of one document body and reveals them
//! into a [`TextSink`] one tick at a time. Scheduling lives elsewhere: the
//! browser drives [`TypingSession::tick`] from an interval timer, tests call
//! it in a loop.

use crate::models::Segment;
use crate::parse::parse_segments;
use crate::text::{TextSink, TypingCursor};

/// Fixed delay between ticks
pub const TICK_INTERVAL_MS: i32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingPhase {
    Typing,
    Finished,
}

/// What a single tick did
#[derive(Debug, PartialEq)]
pub enum TickOutcome<R> {
    /// One character was revealed
    Typed(char),
    /// A whole redacted span was inserted; arm the glitch engine on it
    Redacted(Option<R>),
    /// The current text segment was exhausted
    Advanced,
    /// Every segment was consumed and the cursor glyph removed
    Finished { had_text: bool },
    /// The session had already finished
    Idle,
}

/// Result of skipping to the end
#[derive(Debug)]
pub struct SkipOutcome<R> {
    /// Spans created by the instant render; they need the glitch engine
    pub spans: Vec<R>,
    pub had_text: bool,
}

/// Progressive reveal of one document body
#[derive(Debug, Clone)]
pub struct TypingSession {
    body: String,
    segments: Vec<Segment>,
    cursor: TypingCursor,
    phase: TypingPhase,
    had_text: bool,
}

impl TypingSession {
    /// Parse `body` and place the cursor glyph in `sink`
    pub fn start<S: TextSink>(body: &str, sink: &mut S) -> Self {
        let segments = parse_segments(body);
        let had_text = segments
            .iter()
            .any(|s| matches!(s, Segment::Text { text } if !text.is_empty()));

        log::debug!(
            "typing session: {} segments, {} redactions",
            segments.len(),
            segments.iter().filter(|s| s.is_redaction()).count()
        );

        sink.begin();
        Self {
            body: body.to_string(),
            segments,
            cursor: TypingCursor::new(),
            phase: TypingPhase::Typing,
            had_text,
        }
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == TypingPhase::Finished
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn cursor(&self) -> TypingCursor {
        self.cursor
    }

    /// Whether the body has any plain text to show
    pub fn had_text(&self) -> bool {
        self.had_text
    }

    /// Advance the reveal by one step
    pub fn tick<S: TextSink>(&mut self, sink: &mut S) -> TickOutcome<S::Redaction> {
        if self.is_finished() {
            return TickOutcome::Idle;
        }

        let outcome = match self.segments.get(self.cursor.segment) {
            None => {
                self.finish(sink);
                return TickOutcome::Finished {
                    had_text: self.had_text,
                };
            }
            Some(Segment::Redaction { hidden }) => {
                let span = sink.append_redaction(hidden);
                self.cursor.next_segment();
                TickOutcome::Redacted(span)
            }
            Some(Segment::Text { text }) => match text[self.cursor.offset..].chars().next() {
                Some(ch) => {
                    sink.append_char(ch);
                    self.cursor.advance_char(ch);
                    TickOutcome::Typed(ch)
                }
                None => {
                    self.cursor.next_segment();
                    TickOutcome::Advanced
                }
            },
        };

        sink.reveal_cursor();
        outcome
    }

    /// Abandon the timed reveal and render the whole body at once
    ///
    /// Returns `None` if the session had already finished.
    pub fn skip<S: TextSink>(&mut self, sink: &mut S) -> Option<SkipOutcome<S::Redaction>> {
        if self.is_finished() {
            return None;
        }

        let spans = sink.render_all(&self.body);
        self.cursor = TypingCursor {
            segment: self.segments.len(),
            offset: 0,
        };
        self.finish(sink);

        Some(SkipOutcome {
            spans,
            had_text: self.had_text,
        })
    }

    fn finish<S: TextSink>(&mut self, sink: &mut S) {
        sink.remove_cursor();
        self.phase = TypingPhase::Finished;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{MemorySink, Node, RedactionSurface};

    fn run_to_end(session: &mut TypingSession, sink: &mut MemorySink) -> Vec<TickOutcome<crate::text::MemorySpan>> {
        let mut outcomes = Vec::new();
        loop {
            let outcome = session.tick(sink);
            let done = matches!(outcome, TickOutcome::Finished { .. });
            outcomes.push(outcome);
            if done {
                return outcomes;
            }
        }
    }

    #[test]
    fn test_natural_completion() {
        let mut sink = MemorySink::new();
        let mut session = TypingSession::start("hi[[REDACT:secret]]!", &mut sink);
        assert!(sink.has_cursor());

        let outcomes = run_to_end(&mut session, &mut sink);

        assert_eq!(
            sink.nodes(),
            &[
                Node::Text("hi".into()),
                Node::Redaction("secret".into()),
                Node::Text("!".into())
            ]
        );
        assert!(!sink.has_cursor());
        assert!(session.is_finished());
        assert_eq!(
            outcomes.last(),
            Some(&TickOutcome::Finished { had_text: true })
        );
    }

    #[test]
    fn test_tick_sequence() {
        let mut sink = MemorySink::new();
        let mut session = TypingSession::start("ab[[REDACT:x]]", &mut sink);

        assert_eq!(session.tick(&mut sink), TickOutcome::Typed('a'));
        assert_eq!(session.tick(&mut sink), TickOutcome::Typed('b'));
        assert_eq!(session.tick(&mut sink), TickOutcome::Advanced);

        match session.tick(&mut sink) {
            TickOutcome::Redacted(Some(span)) => assert_eq!(span.original_text(), "x"),
            other => panic!("expected redaction, got {:?}", other),
        }
        assert_eq!(session.cursor(), TypingCursor { segment: 2, offset: 0 });

        assert_eq!(session.tick(&mut sink), TickOutcome::Finished { had_text: true });
        assert_eq!(session.tick(&mut sink), TickOutcome::Idle);
        // Every tick except the finishing ones scrolls the cursor
        assert_eq!(sink.scroll_count(), 4);
    }

    #[test]
    fn test_multibyte_characters_typed_whole() {
        let mut sink = MemorySink::new();
        let mut session = TypingSession::start("é✓", &mut sink);
        assert_eq!(session.tick(&mut sink), TickOutcome::Typed('é'));
        assert_eq!(session.tick(&mut sink), TickOutcome::Typed('✓'));
    }

    #[test]
    fn test_redaction_only_body_has_no_text() {
        let mut sink = MemorySink::new();
        let mut session = TypingSession::start("[[REDACT:a]][[REDACT:b]]", &mut sink);
        let outcomes = run_to_end(&mut session, &mut sink);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[2], TickOutcome::Finished { had_text: false });
        assert_eq!(sink.redactions(), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_body_finishes_on_first_tick() {
        let mut sink = MemorySink::new();
        let mut session = TypingSession::start("", &mut sink);
        assert_eq!(session.tick(&mut sink), TickOutcome::Finished { had_text: false });
        assert!(sink.nodes().is_empty());
        assert!(!sink.has_cursor());
    }

    #[test]
    fn test_skip_matches_natural_completion() {
        let bodies = [
            "hi[[REDACT:secret]]!",
            "Subject [[REDACT:A]] met [[REDACT:B]] at <site> & left.",
            "[[REDACT:only]]",
            "no redactions here",
        ];

        for body in bodies {
            let mut natural = MemorySink::new();
            let mut session = TypingSession::start(body, &mut natural);
            run_to_end(&mut session, &mut natural);

            // Skip at every possible point mid-session
            let total_ticks = {
                let mut counting = MemorySink::new();
                let mut s = TypingSession::start(body, &mut counting);
                run_to_end(&mut s, &mut counting).len()
            };
            for skip_at in 0..total_ticks {
                let mut skipped = MemorySink::new();
                let mut session = TypingSession::start(body, &mut skipped);
                for _ in 0..skip_at {
                    session.tick(&mut skipped);
                }
                if session.is_finished() {
                    continue;
                }
                let outcome = session.skip(&mut skipped).unwrap();

                assert_eq!(skipped.nodes(), natural.nodes(), "body {:?}, skip at {}", body, skip_at);
                assert!(!skipped.has_cursor());
                assert_eq!(outcome.had_text, session.had_text());
                assert_eq!(outcome.spans.len(), natural.redactions().len());
            }
        }
    }

    #[test]
    fn test_cursor_stays_last_while_typing() {
        let mut sink = MemorySink::new();
        let mut session = TypingSession::start("a[[REDACT:b]]c", &mut sink);
        assert_eq!(sink.nodes(), &[Node::Cursor]);

        while !session.is_finished() {
            session.tick(&mut sink);
            if !session.is_finished() {
                assert_eq!(sink.nodes().last(), Some(&Node::Cursor), "after {:?}", session.cursor());
                assert_eq!(sink.nodes().iter().filter(|n| **n == Node::Cursor).count(), 1);
            }
        }
        assert!(!sink.has_cursor());
    }

    #[test]
    fn test_reused_sink_skip_matches_natural_completion() {
        let body = "new [[REDACT:x]] text";

        let mut natural = MemorySink::with_text("old document");
        let mut session = TypingSession::start(body, &mut natural);
        run_to_end(&mut session, &mut natural);

        let mut skipped = MemorySink::with_text("old document");
        let mut session = TypingSession::start(body, &mut skipped);
        session.tick(&mut skipped);
        session.skip(&mut skipped).unwrap();

        assert_eq!(skipped.nodes(), natural.nodes());
        assert_eq!(natural.visible_text(), "new  text");
    }

    #[test]
    fn test_skip_after_finish_is_noop() {
        let mut sink = MemorySink::new();
        let mut session = TypingSession::start("a", &mut sink);
        run_to_end(&mut session, &mut sink);
        assert!(session.skip(&mut sink).is_none());
        assert_eq!(session.tick(&mut sink), TickOutcome::Idle);
    }
}
