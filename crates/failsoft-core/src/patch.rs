//! Span and Edit: the byte-level vocabulary of a rewrite.
//!
//! A rewrite is described as a flat list of [`Edit`]s against one source text.
//! Each edit replaces a half-open byte span with new text; a zero-width span
//! is a pure insertion. Edits never carry positions in the *output* text, so
//! they can be produced in any order and spliced in a single forward pass.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Span
// ============================================================================

/// Byte offsets into source text.
///
/// Spans are half-open intervals: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span.
    ///
    /// # Panics
    /// Panics if `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(
            start <= end,
            "Span start ({}) must be <= end ({})",
            start,
            end
        );
        Span { start, end }
    }

    /// Zero-width span at `position`.
    pub fn point(position: usize) -> Self {
        Span {
            start: position,
            end: position,
        }
    }

    /// Check if this span overlaps with another.
    ///
    /// Two spans overlap if they share any byte positions. A zero-width span
    /// overlaps a non-empty span only when it sits strictly inside it.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

// ============================================================================
// Edit
// ============================================================================

/// Replace the bytes of `span` with `text`.
///
/// `span.start == span.end` denotes a pure insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub span: Span,
    pub text: String,
}

impl Edit {
    /// Replace `span` with `text`.
    pub fn replace(span: Span, text: impl Into<String>) -> Self {
        Edit {
            span,
            text: text.into(),
        }
    }

    /// Insert `text` at `position`.
    pub fn insert(position: usize, text: impl Into<String>) -> Self {
        Edit {
            span: Span::point(position),
            text: text.into(),
        }
    }

    /// Start offset (the `from` of the edit).
    pub fn from(&self) -> usize {
        self.span.start
    }

    /// End offset (the `to` of the edit).
    pub fn to(&self) -> usize {
        self.span.end
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {:?}", self.span, self.text)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod span_tests {
        use super::*;

        #[test]
        fn overlap_rules() {
            let a = Span::new(3, 8);
            assert!(a.overlaps(&Span::new(5, 10)));
            assert!(!a.overlaps(&Span::new(8, 10)), "adjacent spans do not overlap");
            assert!(a.overlaps(&Span::point(5)), "insertion inside a replacement");
            assert!(!a.overlaps(&Span::point(3)), "insertion at the start is fine");
            assert!(!a.overlaps(&Span::point(8)), "insertion at the end is fine");
            assert!(!Span::point(4).overlaps(&Span::point(4)));
        }

        #[test]
        #[should_panic(expected = "must be <= end")]
        fn inverted_span_panics() {
            let _ = Span::new(5, 4);
        }

        #[test]
        fn display() {
            assert_eq!(Span::new(1, 4).to_string(), "[1, 4)");
        }
    }

    mod edit_tests {
        use super::*;

        #[test]
        fn constructors() {
            let e = Edit::replace(Span::new(0, 3), "bar");
            assert_eq!((e.from(), e.to()), (0, 3));

            let i = Edit::insert(7, "?.");
            assert_eq!((i.from(), i.to()), (7, 7));
        }

        #[test]
        fn serializes_span_and_text() {
            let e = Edit::insert(3, "?.");
            let json = serde_json::to_value(&e).unwrap();
            assert_eq!(json["span"]["start"], 3);
            assert_eq!(json["span"]["end"], 3);
            assert_eq!(json["text"], "?.");
        }
    }
}
