//! Line classification and block conflict rules
//!
//! Each line of the buffer is tagged with a [`BlockType`] from its own
//! content only. [`needs_separator`] then decides whether two adjacent tags
//! would be merged by a CommonMark renderer into something the writer did
//! not mean, such as a paragraph swallowing the first item of a list.

use regex::Regex;
use std::sync::OnceLock;

use crate::string_utils::leading_whitespace_chars;

// ─────────────────────────────────────────────────────────────────────────────
// Block Types
// ─────────────────────────────────────────────────────────────────────────────

/// Structural category of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Heading,
    /// `- [ ]` / `- [x]` list item
    Task,
    UnorderedList,
    OrderedList,
    HorizontalRule,
    TableRow,
    PlainText,
    /// A line opening or closing a triple-backtick fence
    CodeFenceMarker,
    Empty,
}

impl BlockType {
    /// Task, bulleted and numbered items.
    pub fn is_list_like(&self) -> bool {
        matches!(
            self,
            BlockType::Task | BlockType::UnorderedList | BlockType::OrderedList
        )
    }

    /// Whether the conflict table ever reads this type's indent.
    fn keeps_indent(&self) -> bool {
        self.is_list_like() || *self == BlockType::PlainText
    }
}

/// Tag and indentation of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub block_type: BlockType,
    /// Leading whitespace in characters. Zero for types whose indent
    /// carries no meaning.
    pub indent: usize,
}

impl Classification {
    /// The state a scan starts from, and the state after a blank line.
    pub const EMPTY: Classification = Classification {
        block_type: BlockType::Empty,
        indent: 0,
    };

    pub fn new(block_type: BlockType, indent: usize) -> Self {
        let indent = if block_type.keeps_indent() { indent } else { 0 };
        Self { block_type, indent }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Line Grammar
// ─────────────────────────────────────────────────────────────────────────────

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#{1,6}\s").expect("heading pattern is valid"))
}

fn task_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-*]\s\[[xX ]\]").expect("task pattern is valid"))
}

fn unordered_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-*+]\s").expect("bullet pattern is valid"))
}

fn ordered_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+\.").expect("ordinal pattern is valid"))
}

fn rule_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-*_]{3,}$").expect("rule pattern is valid"))
}

/// Whether a line opens or closes a code fence.
pub fn is_fence_line(line: &str) -> bool {
    line.trim().starts_with("```")
}

/// Classify one line.
///
/// Total over any input; anything unrecognized is [`BlockType::PlainText`].
pub fn classify(line: &str) -> Classification {
    let content = line.trim_start();
    let stripped = content.trim_end();

    if stripped.is_empty() {
        return Classification::EMPTY;
    }

    let block_type = if is_fence_line(line) {
        BlockType::CodeFenceMarker
    } else if heading_re().is_match(content) {
        BlockType::Heading
    } else if task_re().is_match(content) {
        BlockType::Task
    } else if unordered_re().is_match(content) {
        BlockType::UnorderedList
    } else if ordered_re().is_match(content) {
        BlockType::OrderedList
    } else if rule_re().is_match(stripped) {
        BlockType::HorizontalRule
    } else if stripped.starts_with('|') {
        BlockType::TableRow
    } else {
        BlockType::PlainText
    };

    Classification::new(block_type, leading_whitespace_chars(line))
}

// ─────────────────────────────────────────────────────────────────────────────
// Conflict Rules
// ─────────────────────────────────────────────────────────────────────────────

/// Whether a blank line must separate `prev` from the `curr` line below it.
///
/// The table is asymmetric: a deeper plain line under a list item reads as
/// the item's continuation, but a list directly under a paragraph would be
/// parsed as part of that paragraph.
pub fn needs_separator(
    prev: BlockType,
    prev_indent: usize,
    curr: BlockType,
    curr_indent: usize,
) -> bool {
    use BlockType::*;

    if prev == Empty || curr == Empty {
        return false;
    }

    if prev == PlainText && curr.is_list_like() {
        return true;
    }
    if prev.is_list_like() && curr == PlainText {
        return curr_indent <= prev_indent;
    }
    if prev.is_list_like() && curr.is_list_like() && prev != curr && curr_indent <= prev_indent {
        return true;
    }

    (prev == TableRow) != (curr == TableRow)
}

/// [`needs_separator`] over two classifications.
pub fn conflicts(prev: Classification, curr: Classification) -> bool {
    needs_separator(prev.block_type, prev.indent, curr.block_type, curr.indent)
}
