//! Source location spans.

use std::fmt;

/// Identifies one registered source text in a [`SourceMap`](crate::SourceMap).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct SourceId(u32);

impl SourceId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        SourceId(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Byte range inside one source text.
///
/// `end` is exclusive. A span always belongs to exactly one source, so
/// programs assembled from a prelude, a main file and `$LOAD`ed modules
/// still report errors against the right file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub source: SourceId,
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Placeholder for trees built at runtime.
    pub const DUMMY: Span = Span {
        source: SourceId(0),
        start: 0,
        end: 0,
    };

    #[inline]
    pub const fn new(source: SourceId, start: u32, end: u32) -> Self {
        Span { source, start, end }
    }

    /// Create from a byte range, saturating offsets beyond `u32::MAX`.
    pub fn from_range(source: SourceId, range: std::ops::Range<usize>) -> Self {
        let start = u32::try_from(range.start).unwrap_or(u32::MAX);
        let end = u32::try_from(range.end).unwrap_or(u32::MAX);
        Span { source, start, end }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Smallest span covering both. Spans from different sources keep `self`.
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        if self.source != other.source {
            return self;
        }
        Span {
            source: self.source,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}{:?}", self.start, self.end, self.source)
    }
}
