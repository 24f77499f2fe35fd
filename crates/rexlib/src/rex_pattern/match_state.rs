// Capture offsets produced by the last execution

use std::ops::Range;

/// Start/end byte offsets of one capture group. Slot 0 is the whole match.
/// A group that did not take part in the match has negative offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSlot {
    start: isize,
    end: isize,
}

impl CaptureSlot {
    pub const UNSET: CaptureSlot = CaptureSlot { start: -1, end: -1 };

    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        CaptureSlot {
            start: start as isize,
            end: end as isize,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start >= 0
    }

    /// Raw `(start, end)` pair, negative when not participating.
    pub fn offsets(&self) -> (isize, isize) {
        (self.start, self.end)
    }

    pub fn range(&self) -> Option<Range<usize>> {
        self.is_valid()
            .then(|| self.start as usize..self.end as usize)
    }

    pub fn len(&self) -> usize {
        if self.is_valid() {
            (self.end - self.start) as usize
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Capture table of the most recent successful execution on a handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    slots: Vec<CaptureSlot>,
}

impl MatchState {
    pub(crate) fn new(slots: Vec<CaptureSlot>) -> Self {
        debug_assert!(slots.first().is_some_and(CaptureSlot::is_valid));
        MatchState { slots }
    }

    pub fn slots(&self) -> &[CaptureSlot] {
        &self.slots
    }

    pub fn slot(&self, n: usize) -> Option<CaptureSlot> {
        self.slots.get(n).copied()
    }

    /// Whole-match range.
    pub fn whole(&self) -> Range<usize> {
        self.slots
            .first()
            .and_then(CaptureSlot::range)
            .unwrap_or(0..0)
    }

    /// Number of explicit groups.
    pub fn capture_count(&self) -> usize {
        self.slots.len().saturating_sub(1)
    }
}

/// One match viewed against its subject. Owns a copy of the capture table,
/// so it stays valid after the handle executes again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'s> {
    subject: &'s [u8],
    slots: Vec<CaptureSlot>,
}

impl<'s> Match<'s> {
    pub(crate) fn new(subject: &'s [u8], state: &MatchState) -> Self {
        Match {
            subject,
            slots: state.slots.clone(),
        }
    }

    /// 0-based byte offset of the match start.
    pub fn start(&self) -> usize {
        self.range().start
    }

    /// 0-based byte offset one past the match end.
    pub fn end(&self) -> usize {
        self.range().end
    }

    pub fn range(&self) -> Range<usize> {
        self.slots
            .first()
            .and_then(CaptureSlot::range)
            .unwrap_or(0..0)
    }

    pub fn is_empty(&self) -> bool {
        self.start() == self.end()
    }

    pub fn as_bytes(&self) -> &'s [u8] {
        &self.subject[self.range()]
    }

    pub fn slots(&self) -> &[CaptureSlot] {
        &self.slots
    }

    pub fn slot(&self, n: usize) -> Option<CaptureSlot> {
        self.slots.get(n).copied()
    }

    /// Text of group `n` (0 = whole match); `None` if the group does not
    /// exist or did not participate.
    pub fn get(&self, n: usize) -> Option<&'s [u8]> {
        let range = self.slots.get(n)?.range()?;
        Some(&self.subject[range])
    }

    pub fn capture_count(&self) -> usize {
        self.slots.len().saturating_sub(1)
    }

    /// Groups 1..=n.
    pub fn captures(&self) -> Vec<Option<&'s [u8]>> {
        (1..self.slots.len()).map(|n| self.get(n)).collect()
    }

    /// The captures, or the whole match when the pattern has no groups.
    pub fn values(&self) -> Vec<Option<&'s [u8]>> {
        if self.capture_count() == 0 {
            vec![Some(self.as_bytes())]
        } else {
            self.captures()
        }
    }
}
