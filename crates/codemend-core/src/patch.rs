//! Helpers for analyzing and combining unified-diff patch text, plus the
//! diff renderer behind `PatchEntry::unified_diff`.

use similar::TextDiff;

/// Added and removed line bodies pulled out of a patch, marker stripped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangedLines {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

/// True when the patch contains no change lines. File headers (`+++`/`---`)
/// do not count as changes.
pub fn is_patch_empty(patch: &str) -> bool {
    !patch.lines().any(is_change_line)
}

/// Extract the added and removed line bodies, headers excluded.
pub fn changed_text(patch: &str) -> ChangedLines {
    let mut changed = ChangedLines::default();
    for line in patch.lines() {
        if line.starts_with('+') && !line.starts_with("+++") {
            changed.added.push(line[1..].to_string());
        }
        if line.starts_with('-') && !line.starts_with("---") {
            changed.removed.push(line[1..].to_string());
        }
    }
    changed
}

/// Concatenate two patches. A blank side passes the other through unchanged;
/// otherwise both are trimmed and joined with a newline.
pub fn merge_patches(first: &str, second: &str) -> String {
    if first.trim().is_empty() {
        return second.to_string();
    }
    if second.trim().is_empty() {
        return first.to_string();
    }
    format!("{}\n{}", first.trim(), second.trim())
}

/// Count `(added, removed)` change lines, headers excluded.
pub fn count_changes(patch: &str) -> (usize, usize) {
    let mut added = 0;
    let mut removed = 0;
    for line in patch.lines() {
        if line.starts_with('+') && !line.starts_with("+++") {
            added += 1;
        }
        if line.starts_with('-') && !line.starts_with("---") {
            removed += 1;
        }
    }
    (added, removed)
}

/// 1-based positions of change lines within the patch text itself, for
/// highlighting the patch in an editor.
pub fn modified_line_numbers(patch: &str) -> Vec<usize> {
    patch
        .lines()
        .enumerate()
        .filter(|(_, line)| is_change_line(line))
        .map(|(i, _)| i + 1)
        .collect()
}

/// Render a unified diff between two code versions, three context lines per
/// hunk.
pub fn unified_diff(old: &str, new: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .to_string()
}

fn is_change_line(line: &str) -> bool {
    (line.starts_with('+') && !line.starts_with("+++"))
        || (line.starts_with('-') && !line.starts_with("---"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "--- a/main.py\n+++ b/main.py\n@@ -1,2 +1,2 @@\n-print('hi'\n+print('hi')\n context";

    #[test]
    fn test_is_patch_empty() {
        assert!(is_patch_empty(""));
        assert!(is_patch_empty("@@ -1,1 +1,1 @@\n context only"));
        assert!(is_patch_empty("--- a/f\n+++ b/f"));
        assert!(!is_patch_empty(SAMPLE));
    }

    #[test]
    fn test_changed_text_skips_headers() {
        let changed = changed_text(SAMPLE);
        assert_eq!(changed.added, vec!["print('hi')"]);
        assert_eq!(changed.removed, vec!["print('hi'"]);
    }

    #[test]
    fn test_merge_patches_blank_side_passthrough() {
        assert_eq!(merge_patches("  \n", "+x"), "+x");
        assert_eq!(merge_patches("+x", "   "), "+x");
        assert_eq!(merge_patches("+a\n", "\n+b"), "+a\n+b");
    }

    #[test]
    fn test_count_changes() {
        assert_eq!(count_changes(SAMPLE), (1, 1));
        assert_eq!(count_changes("+one\n+two\n-three"), (2, 1));
        assert_eq!(count_changes(""), (0, 0));
    }

    #[test]
    fn test_modified_line_numbers_are_one_based() {
        assert_eq!(modified_line_numbers(SAMPLE), vec![4, 5]);
        assert_eq!(modified_line_numbers("ctx\n+add"), vec![2]);
    }

    #[test]
    fn test_unified_diff_round_trips_through_helpers() {
        let diff = unified_diff("a\nb\nc\n", "a\nx\nc\n");
        assert!(!is_patch_empty(&diff));
        let changed = changed_text(&diff);
        assert_eq!(changed.added, vec!["x"]);
        assert_eq!(changed.removed, vec!["b"]);
    }

    #[test]
    fn test_unified_diff_identical_inputs_is_empty() {
        assert!(is_patch_empty(&unified_diff("same\n", "same\n")));
    }
}
