use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Byte range of a token or node inside the pattern source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Zero-width span at `pos`, used for end-of-input diagnostics
    pub fn at(pos: usize) -> Self {
        Span::new(pos, pos)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn merge(&self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    pub fn to_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Text covered by this span, or an empty string when out of bounds
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.to_range()).unwrap_or("")
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge_covers_both() {
        let merged = Span::new(4, 7).merge(Span::new(0, 5));
        assert_eq!(merged, Span::new(0, 7));
        assert_eq!(merged.len(), 7);
    }

    #[test]
    fn test_span_at_is_empty() {
        let span = Span::at(12);
        assert!(span.is_empty());
        assert_eq!(span.to_string(), "12..12");
    }

    #[test]
    fn test_span_slice() {
        let source = "(\"a\"|<num>)";
        assert_eq!(Span::new(5, 10).slice(source), "<num>");
        assert_eq!(Span::new(5, 99).slice(source), "");
    }
}
