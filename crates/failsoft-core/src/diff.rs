//! Unified diff generation utilities.
//!
//! Rewrites never insert or remove line terminators, so line `N` of the
//! rewritten text always corresponds to line `N` of the original. The diff is
//! therefore produced line by line: every changed line becomes a one-line hunk.

use crate::text::LineIndex;

/// Generate a unified diff between `before` and `after` for the file `name`.
///
/// Returns an empty string when the texts are identical. Line counts are
/// expected to match; extra trailing lines on either side are reported as
/// pure removals or additions.
pub fn generate_line_diff(name: &str, before: &str, after: &str) -> String {
    if before == after {
        return String::new();
    }

    let old = LineIndex::new(before);
    let new = LineIndex::new(after);
    let lines = old.line_count().max(new.line_count()) as u32;

    let mut diff = String::new();
    diff.push_str(&format!("--- a/{}\n", name));
    diff.push_str(&format!("+++ b/{}\n", name));

    for line in 1..=lines {
        let old_line = old.line_text(line);
        let new_line = new.line_text(line);
        if old_line == new_line {
            continue;
        }
        let old_count = u32::from(old_line.is_some());
        let new_count = u32::from(new_line.is_some());
        diff.push_str(&format!(
            "@@ -{},{} +{},{} @@\n",
            line, old_count, line, new_count
        ));
        if let Some(text) = old_line {
            diff.push_str(&format!("-{}\n", text));
        }
        if let Some(text) = new_line {
            diff.push_str(&format!("+{}\n", text));
        }
    }

    diff
}

// ============================================================================
// Tests
// ============================================================================
