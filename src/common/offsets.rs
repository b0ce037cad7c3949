use std::fmt;
use std::ops::Range;

use derive_more::{Deref, DerefMut, From, Index, IndexMut, Into};

/// Start and end byte offsets of one capture group, relative to the subject start.
///
/// A group that did not take part in the match holds `(-1, -1)`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ParenPair {
    /// Offset of the first byte of the group.
    pub start: isize,
    /// Offset after the last byte of the group.
    pub end: isize,
}

impl ParenPair {
    /// The sentinel for a group that did not participate.
    pub const UNSET: ParenPair = ParenPair { start: -1, end: -1 };

    /// Construct a pair from a matched span.
    pub fn new(span: Range<usize>) -> Self {
        ParenPair {
            start: span.start as isize,
            end: span.end as isize,
        }
    }

    /// Indicating that the group participated in the match.
    pub fn is_set(&self) -> bool {
        self.start >= 0 && self.end >= 0
    }

    /// Returns the span of the group, if it participated.
    pub fn range(&self) -> Option<Range<usize>> {
        if self.is_set() {
            Some(self.start as usize..self.end as usize)
        } else {
            None
        }
    }
}

impl Default for ParenPair {
    fn default() -> Self {
        Self::UNSET
    }
}

impl fmt::Debug for ParenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

impl From<Option<Range<usize>>> for ParenPair {
    fn from(span: Option<Range<usize>>) -> Self {
        span.map_or(Self::UNSET, Self::new)
    }
}

/// The capture offsets of the last match, slot 0 being the whole match.
///
/// The buffer is overwritten by every match attempt on the owning pattern.
#[repr(transparent)]
#[derive(Clone, Debug, Default, PartialEq, Eq, Deref, DerefMut, From, Index, IndexMut, Into)]
#[deref(forward)]
#[deref_mut(forward)]
pub struct Offsets(Vec<ParenPair>);

impl Offsets {
    /// Allocate `nparens + 1` unset slots.
    pub fn with_parens(nparens: usize) -> Self {
        Offsets(vec![ParenPair::UNSET; nparens + 1])
    }

    /// Mark the whole match as failed, leaving the group slots alone.
    pub fn clear_match(&mut self) {
        if let Some(whole) = self.0.first_mut() {
            *whole = ParenPair::UNSET;
        }
    }
}

/// The subject region recorded by the last successful match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubjectBounds {
    /// Byte index of the subject start in the host buffer.
    pub start: usize,
    /// Length of the subject in bytes.
    pub len: usize,
}

impl SubjectBounds {
    /// Translate a group span relative to the subject into a host buffer range.
    pub fn absolute(&self, span: Range<usize>) -> Range<usize> {
        self.start + span.start..self.start + span.end
    }
}
