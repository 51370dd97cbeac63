//! Boundary repair pass
//!
//! Scans the whole buffer and finds every line that starts a block the
//! renderer would otherwise glue onto the block above it. The fix is always
//! a single blank line inserted at that line's start.
//!
//! # Example
//! ```
//! use papersmith::markdown::plan_repairs;
//!
//! let plan = plan_repairs("Some text\n- item one");
//! let (text, caret) = plan.apply("Some text\n- item one", 0);
//! assert_eq!(text, "Some text\n\n- item one");
//! assert_eq!(caret, 0);
//! ```

use log::debug;

use crate::markdown::blocks::{classify, conflicts, is_fence_line, BlockType, Classification};
use crate::string_utils::{floor_char_boundary, line_spans};

/// Line-start offsets where a blank line must be inserted, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairPlan {
    offsets: Vec<usize>,
}

impl RepairPlan {
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Where `offset` ends up once the plan is applied: one byte further
    /// for every insertion at or before it.
    pub fn map_offset(&self, offset: usize) -> usize {
        offset + self.offsets.partition_point(|&pos| pos <= offset)
    }

    /// Insert every separator and carry the caret along.
    ///
    /// Insertions run from the bottom up so that earlier offsets stay valid.
    /// The caret stays on the same character it was on.
    pub fn apply(&self, text: &str, caret: usize) -> (String, usize) {
        let mut out = String::with_capacity(text.len() + self.offsets.len());
        out.push_str(text);

        for &pos in self.offsets.iter().rev() {
            out.insert(pos, '\n');
        }

        (out, self.map_offset(floor_char_boundary(text, caret)))
    }
}

/// Compute the separators the buffer needs.
///
/// Fence lines flip the fence flag and are never checked themselves; lines
/// inside a fence are not classified at all.
pub fn plan_repairs(text: &str) -> RepairPlan {
    let mut offsets = Vec::new();
    let mut prev = Classification::EMPTY;
    let mut in_fence = false;

    for (start, line) in line_spans(text) {
        if is_fence_line(line) {
            in_fence = !in_fence;
            prev = Classification::new(BlockType::CodeFenceMarker, 0);
            continue;
        }
        if in_fence {
            continue;
        }

        let curr = classify(line);
        if conflicts(prev, curr) {
            debug!(
                "separator needed at {} ({:?} -> {:?})",
                start, prev.block_type, curr.block_type
            );
            offsets.push(start);
        }
        prev = curr;
    }

    RepairPlan { offsets }
}

/// Plan and apply in one go. `None` when the buffer is already clean.
pub fn repair(text: &str, caret: usize) -> Option<(String, usize)> {
    let plan = plan_repairs(text);
    if plan.is_empty() {
        return None;
    }
    debug!("inserting {} block separator(s)", plan.len());
    Some(plan.apply(text, caret))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(text: &str) -> String {
        repair(text, 0).map(|(t, _)| t).unwrap_or_else(|| text.to_string())
    }

    fn kinds(text: &str) -> Vec<BlockType> {
        text.split('\n').map(|l| classify(l).block_type).collect()
    }

    #[test]
    fn test_text_then_list_gets_separator() {
        assert_eq!(fixed("Some text\n- item one"), "Some text\n\n- item one");
    }

    #[test]
    fn test_continuation_text_is_left_alone() {
        assert!(plan_repairs("- item\n  continued text").is_empty());
    }

    #[test]
    fn test_list_kind_switch() {
        assert_eq!(fixed("- a\n1. b"), "- a\n\n1. b");
        assert_eq!(fixed("- a\n  1. nested"), "- a\n  1. nested");
        assert_eq!(fixed("1. a\n- [ ] b"), "1. a\n\n- [ ] b");
    }

    #[test]
    fn test_tables_are_fenced_by_blank_lines() {
        let text = "Intro\n| a | b |\n|---|---|\n| 1 | 2 |\nOutro";
        assert_eq!(
            fixed(text),
            "Intro\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\nOutro"
        );
    }

    #[test]
    fn test_multiple_insertions_in_one_plan() {
        let plan = plan_repairs("a\n- b\nc\n1. d");
        assert_eq!(plan.offsets(), &[2, 6, 8]);
        let (text, _) = plan.apply("a\n- b\nc\n1. d", 0);
        assert_eq!(text, "a\n\n- b\n\nc\n\n1. d");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Some text\n- item one",
            "a\n- b\nc\n1. d\n| x |\n- [ ] t",
            "# H\n| t |\ntext\n```\n- x\n```\n| y |",
            "",
            "\n\n",
        ];
        for input in inputs {
            let once = fixed(input);
            assert!(plan_repairs(&once).is_empty(), "second pass changed {:?}", once);
        }
    }

    #[test]
    fn test_code_fence_contents_are_opaque() {
        let text = "```\nplain\n- list\n| table |\n```";
        assert!(plan_repairs(text).is_empty());
    }

    #[test]
    fn test_unclosed_fence_hides_rest_of_buffer() {
        assert!(plan_repairs("```\ntext\n- item").is_empty());
    }

    #[test]
    fn test_table_right_after_fence_is_separated() {
        assert_eq!(fixed("```\ncode\n```\n| a |"), "```\ncode\n```\n\n| a |");
    }

    #[test]
    fn test_list_right_after_fence_is_not_separated() {
        assert!(plan_repairs("```\ncode\n```\n- a").is_empty());
    }

    #[test]
    fn test_caret_after_insertion_point_moves_forward() {
        // caret on the "i" of "item"
        let (text, caret) = repair("Some text\n- item", 12).unwrap();
        assert_eq!(text, "Some text\n\n- item");
        assert_eq!(&text[caret..], "item");
    }

    #[test]
    fn test_caret_at_insertion_point_stays_on_line() {
        let (text, caret) = repair("Some text\n- item", 10).unwrap();
        assert_eq!(caret, 11);
        assert_eq!(&text[caret..], "- item");
    }

    #[test]
    fn test_map_offset_counts_insertions_at_or_before() {
        let plan = plan_repairs("a\n- b\nc\n1. d");
        assert_eq!(plan.map_offset(0), 0);
        assert_eq!(plan.map_offset(2), 3);
        assert_eq!(plan.map_offset(7), 9);
        assert_eq!(plan.map_offset(100), 103);
    }

    #[test]
    fn test_caret_before_insertion_point_is_untouched() {
        let (_, caret) = repair("Some text\n- item", 4).unwrap();
        assert_eq!(caret, 4);
    }

    #[test]
    fn test_classification_is_stable_after_repair() {
        let input = "a\n- b\nc\n| t |\n1. d";
        let plan = plan_repairs(input);
        let (output, _) = plan.apply(input, 0);

        // Expected: input classification with an Empty at every insertion.
        let mut expected = Vec::new();
        for (start, line) in line_spans(input) {
            if plan.offsets().contains(&start) {
                expected.push(BlockType::Empty);
            }
            expected.push(classify(line).block_type);
        }
        assert_eq!(kinds(&output), expected);
    }

    #[test]
    fn test_unicode_content() {
        assert_eq!(fixed("日本語\n- 項目"), "日本語\n\n- 項目");
    }
}
