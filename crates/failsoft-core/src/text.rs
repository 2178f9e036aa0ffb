//! Text position utilities for byte offset and line:column conversions.
//!
//! ## Coordinate Conventions
//!
//! - Lines and columns are **1-indexed** (matching editor conventions)
//! - Byte offsets are **0-indexed**
//! - Columns count Unicode scalar values (chars), not bytes
//!
//! [`LineIndex`] precomputes line starts once so that reporting positions for
//! many edits in the same source stays linear.

/// Precomputed line start offsets for one source text.
#[derive(Debug, Clone)]
pub struct LineIndex<'src> {
    source: &'src str,
    /// Byte offset of the first character of every line.
    line_starts: Vec<usize>,
}

impl<'src> LineIndex<'src> {
    /// Build the index for `source`.
    pub fn new(source: &'src str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            source,
            line_starts,
        }
    }

    /// Number of lines (a trailing newline does not open a new line).
    pub fn line_count(&self) -> usize {
        if self.source.is_empty() {
            0
        } else if self.source.ends_with('\n') {
            self.line_starts.len() - 1
        } else {
            self.line_starts.len()
        }
    }

    /// Convert a byte offset to a 1-indexed `(line, col)` pair.
    ///
    /// Offsets past the end clamp to the end of the source.
    pub fn position(&self, offset: usize) -> (u32, u32) {
        let offset = offset.min(self.source.len());
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert - 1,
        };
        let line_start = self.line_starts[line_idx];
        let col = self
            .source
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count());
        (line_idx as u32 + 1, col as u32 + 1)
    }

    /// Text of the 1-indexed `line`, without its line terminator.
    pub fn line_text(&self, line: u32) -> Option<&'src str> {
        let idx = (line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(idx)?;
        if start >= self.source.len() && idx > 0 {
            return None;
        }
        let end = self
            .line_starts
            .get(idx + 1)
            .map_or(self.source.len(), |next| next - 1);
        let text = &self.source[start..end];
        Some(text.strip_suffix('\r').unwrap_or(text))
    }
}
