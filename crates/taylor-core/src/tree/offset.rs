//! Byte offset ranges used while the tree is being assembled.

/// Inclusive byte range into a file's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OffsetRange {
    /// First byte.
    pub start: usize,
    /// Last byte.
    pub end: usize,
}

impl OffsetRange {
    /// Creates a new range.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Range of a declaration, which includes the byte one past its length.
    #[must_use]
    pub fn declaration(offset: usize, length: usize) -> Self {
        Self::new(offset, offset + length)
    }

    /// Range of a token, ending on its last byte.
    #[must_use]
    pub fn token(offset: usize, length: usize) -> Self {
        Self::new(offset, (offset + length).saturating_sub(1))
    }

    /// Range of a blank-line match, excluding the newlines that delimit it.
    #[must_use]
    pub fn blank_lines(match_start: usize, match_end: usize) -> Self {
        Self::new(match_start + 1, match_end.saturating_sub(1))
    }

    /// Returns true if `other` lies entirely within this range.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Returns the range moved forward by `by` bytes.
    #[must_use]
    pub fn shifted(self, by: usize) -> Self {
        Self::new(self.start + by, self.end + by)
    }

    /// Returns true if the two ranges share at least one byte.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}
