//! Document sequencing for a release
//!
//! Tracks which document the viewer shows and when the release has run out.
//! Pure bookkeeping; the DOM side lives in `api::viewer`.

/// What the viewer should render next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStep {
    Show(usize),
    End,
}

/// Position in the list of documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseState {
    count: usize,
    current: Option<usize>,
    ended: bool,
}

impl ReleaseState {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            current: None,
            ended: false,
        }
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Jump to `index`; anything past the last document ends the release
    pub fn show(&mut self, index: usize) -> ReleaseStep {
        if index >= self.count {
            self.ended = true;
            return ReleaseStep::End;
        }
        self.current = Some(index);
        self.ended = false;
        ReleaseStep::Show(index)
    }

    /// Advance to the following document
    pub fn next(&mut self) -> ReleaseStep {
        if self.ended {
            return ReleaseStep::End;
        }
        match self.current {
            None => self.show(0),
            Some(i) => self.show(i + 1),
        }
    }
}
