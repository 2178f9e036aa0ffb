// Copyright (c) The failsoft contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Edit collection and text splicing.
//!
//! This module provides [`EditBatch`], which collects span-based edits
//! produced during a single traversal and splices them into the source in
//! one forward pass.
//!
//! # Edit Primitives
//!
//! | Primitive | Description | Span Semantics |
//! |-----------|-------------|----------------|
//! | `Replace(span, text)` | Replace content at span with new text | `span.start..span.end` becomes `text` |
//! | `InsertBefore(span, text)` | Insert text immediately before span | Insert at `span.start` |
//! | `InsertAfter(span, text)` | Insert text immediately after span | Insert at `span.end` |
//!
//! Every primitive normalizes to an [`Edit`] (`{span, text}`), which is what
//! the batch stores and splices.
//!
//! # Example
//!
//! ```
//! use failsoft_core::edit::{EditBatch, EditPrimitive};
//! use failsoft_core::patch::Span;
//!
//! let source = "foo.bar";
//!
//! let mut batch = EditBatch::new(source);
//! batch.add(EditPrimitive::Replace {
//!     span: Span::new(3, 4),
//!     new_text: "?.".to_string(),
//! });
//!
//! assert_eq!(batch.apply().unwrap(), "foo?.bar");
//! ```

use thiserror::Error;
use tracing::trace;

use crate::patch::{Edit, Span};

/// An atomic edit operation on source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditPrimitive {
    /// Replace content at span with new text.
    Replace { span: Span, new_text: String },

    /// Insert text immediately before the given span.
    /// The insertion point is `anchor_span.start`.
    InsertBefore { anchor_span: Span, text: String },

    /// Insert text immediately after the given span.
    /// The insertion point is `anchor_span.end`.
    InsertAfter { anchor_span: Span, text: String },
}

impl EditPrimitive {
    /// Normalize into a `{span, text}` edit.
    pub fn into_edit(self) -> Edit {
        match self {
            EditPrimitive::Replace { span, new_text } => Edit::replace(span, new_text),
            EditPrimitive::InsertBefore { anchor_span, text } => {
                Edit::insert(anchor_span.start, text)
            }
            EditPrimitive::InsertAfter { anchor_span, text } => Edit::insert(anchor_span.end, text),
        }
    }
}

impl From<EditPrimitive> for Edit {
    fn from(primitive: EditPrimitive) -> Self {
        primitive.into_edit()
    }
}

/// Error type for splice operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpliceError {
    /// Two edits have overlapping spans.
    #[error("overlapping edits: {first} and {second}")]
    OverlappingEdits { first: Span, second: Span },

    /// An edit span extends beyond source length.
    #[error("span {span} is out of bounds for source of length {source_len}")]
    SpanOutOfBounds { span: Span, source_len: usize },

    /// An edit boundary falls inside a multi-byte character.
    #[error("span {span} does not fall on character boundaries")]
    NotCharBoundary { span: Span },
}

/// Result type for splice operations.
pub type SpliceResult<T> = Result<T, SpliceError>;

/// Collects edits against one source text and splices them.
///
/// Edits are appended in traversal order with no deduplication. [`apply`]
/// sorts them ascending by `from` (ties: insertions before replacements,
/// otherwise insertion order) and rebuilds the text in a single pass, copying
/// every byte not covered by an edit verbatim.
///
/// [`apply`]: EditBatch::apply
#[derive(Debug, Clone)]
pub struct EditBatch<'src> {
    source: &'src str,
    edits: Vec<Edit>,
}

impl<'src> EditBatch<'src> {
    /// Create an empty batch for the given source.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            edits: Vec::new(),
        }
    }

    /// Add an edit primitive to the batch.
    pub fn add(&mut self, edit: EditPrimitive) {
        self.push(edit.into_edit());
    }

    /// Add an already-normalized edit.
    pub fn push(&mut self, edit: Edit) {
        trace!(span = %edit.span, text = %edit.text, "edit");
        self.edits.push(edit);
    }

    /// Add multiple edits.
    pub fn extend(&mut self, edits: impl IntoIterator<Item = Edit>) {
        for edit in edits {
            self.push(edit);
        }
    }

    /// Returns the number of edits currently queued.
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Returns true if no edits are queued.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Queued edits sorted the way [`EditBatch::apply`] consumes them.
    pub fn sorted_edits(&self) -> Vec<Edit> {
        let mut sorted = self.edits.clone();
        sort_edits(&mut sorted);
        sorted
    }

    /// Splice all queued edits and return the rewritten text.
    ///
    /// An empty batch returns the source unchanged.
    ///
    /// # Errors
    ///
    /// - `SpliceError::SpanOutOfBounds` if any span exceeds source length
    /// - `SpliceError::NotCharBoundary` if any span splits a character
    /// - `SpliceError::OverlappingEdits` if any two edits overlap
    pub fn apply(self) -> SpliceResult<String> {
        self.check_bounds()?;

        let mut edits = self.edits;
        sort_edits(&mut edits);

        let added: usize = edits.iter().map(|e| e.text.len()).sum();
        let mut out = String::with_capacity(self.source.len() + added);
        let mut cursor = 0usize;
        let mut previous: Option<Span> = None;

        for edit in &edits {
            if let Some(first) = previous.filter(|prev| prev.overlaps(&edit.span)) {
                return Err(SpliceError::OverlappingEdits {
                    first,
                    second: edit.span,
                });
            }
            out.push_str(&self.source[cursor..edit.span.start]);
            out.push_str(&edit.text);
            cursor = edit.span.end;
            previous = Some(edit.span);
        }
        out.push_str(&self.source[cursor..]);

        Ok(out)
    }

    fn check_bounds(&self) -> SpliceResult<()> {
        let source_len = self.source.len();
        for edit in &self.edits {
            let span = edit.span;
            if span.end > source_len {
                return Err(SpliceError::SpanOutOfBounds { span, source_len });
            }
            if !self.source.is_char_boundary(span.start) || !self.source.is_char_boundary(span.end)
            {
                return Err(SpliceError::NotCharBoundary { span });
            }
        }
        Ok(())
    }
}

/// Stable sort by `(from, to)`: at equal `from`, insertions precede the
/// replacement that starts there.
fn sort_edits(edits: &mut [Edit]) {
    edits.sort_by_key(|e| (e.span.start, e.span.end));
}

/// Splice a list of edits into `source` in one call.
pub fn splice(source: &str, edits: impl IntoIterator<Item = Edit>) -> SpliceResult<String> {
    let mut batch = EditBatch::new(source);
    batch.extend(edits);
    batch.apply()
}
