//! Read position of a typing session

/// Position inside an ordered list of segments
///
/// `offset` is a byte offset into the current segment's text, always on a
/// char boundary. Both fields only move forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypingCursor {
    pub segment: usize,
    pub offset: usize,
}

impl TypingCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step past one character of the current segment
    pub fn advance_char(&mut self, ch: char) {
        self.offset += ch.len_utf8();
    }

    /// Move to the start of the next segment
    pub fn next_segment(&mut self) {
        self.segment += 1;
        self.offset = 0;
    }

    pub fn is_past(&self, segment_count: usize) -> bool {
        self.segment >= segment_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_segment_resets_offset() {
        let mut cursor = TypingCursor::new();
        cursor.advance_char('a');
        cursor.advance_char('é');
        assert_eq!(cursor.offset, 3);

        cursor.next_segment();
        assert_eq!(cursor, TypingCursor { segment: 1, offset: 0 });
        assert!(cursor.is_past(1));
        assert!(!cursor.is_past(2));
    }
}
