//! List continuation on line break
//!
//! When the writer presses Enter on a list item the next line gets the same
//! kind of marker. Pressing Enter on an item that has nothing but its marker
//! ends the list instead.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::state::EditorState;
use crate::string_utils::line_span_at;

fn task_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\s*)([-*]) \[[xX ]\]\s+").expect("task item pattern is valid")
    })
}

fn bullet_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*)([-*+])\s+").expect("bullet item pattern is valid"))
}

fn ordered_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*)([0-9]+)\.\s+").expect("ordered item pattern is valid"))
}

// ─────────────────────────────────────────────────────────────────────────────
// List Item Grammar
// ─────────────────────────────────────────────────────────────────────────────

/// The marker a list item line starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Task { bullet: char },
    Bullet { bullet: char },
    Ordered { number: u64 },
}

/// A line recognised as a list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem<'a> {
    pub indent: &'a str,
    pub marker: ListMarker,
    /// Text after the marker and its trailing whitespace.
    pub content: &'a str,
}

impl ListItem<'_> {
    /// True when the item holds nothing but its marker.
    pub fn is_bare(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Prefix for the item that follows this one.
    ///
    /// Tasks always restart unchecked. Ordinals simply add one; an ordinal
    /// at `u64::MAX` has no successor.
    pub fn next_prefix(&self) -> Option<String> {
        match self.marker {
            ListMarker::Task { bullet } => Some(format!("{}{} [ ] ", self.indent, bullet)),
            ListMarker::Bullet { bullet } => Some(format!("{}{} ", self.indent, bullet)),
            ListMarker::Ordered { number } => number
                .checked_add(1)
                .map(|next| format!("{}{}. ", self.indent, next)),
        }
    }
}

fn bullet_char(caps: &Captures<'_>) -> char {
    caps[2].chars().next().unwrap_or('-')
}

/// Match a line against the task, bullet and ordered grammars, in that order.
///
/// Task grammar is checked first since every task line also reads as a
/// bullet. Ordinals too large for `u64` are not treated as list items.
pub fn parse_list_item(line: &str) -> Option<ListItem<'_>> {
    let build = |caps: Captures<'_>, marker: ListMarker| {
        let (indent, whole) = match (caps.get(1), caps.get(0)) {
            (Some(indent), Some(whole)) => (indent, whole),
            _ => return None,
        };
        Some(ListItem {
            indent: &line[indent.range()],
            marker,
            content: &line[whole.end()..],
        })
    };

    if let Some(caps) = task_item_re().captures(line) {
        let marker = ListMarker::Task {
            bullet: bullet_char(&caps),
        };
        return build(caps, marker);
    }
    if let Some(caps) = bullet_item_re().captures(line) {
        let marker = ListMarker::Bullet {
            bullet: bullet_char(&caps),
        };
        return build(caps, marker);
    }
    if let Some(caps) = ordered_item_re().captures(line) {
        let number = caps[2].parse::<u64>().ok()?;
        return build(caps, ListMarker::Ordered { number });
    }
    None
}

// ─────────────────────────────────────────────────────────────────────────────
// Line Break Handling
// ─────────────────────────────────────────────────────────────────────────────

/// What a line break at the caret should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineBreakAction {
    /// Not a list item: the host inserts a plain line break.
    Default,
    /// Bare marker: clear the line and leave the list.
    Terminate,
    /// Break the line and start the next item with this prefix.
    Continue(String),
}

/// Decide how a line break on `line` is handled.
pub fn line_break_action(line: &str) -> LineBreakAction {
    let Some(item) = parse_list_item(line) else {
        return LineBreakAction::Default;
    };
    if item.is_bare() {
        return LineBreakAction::Terminate;
    }
    match item.next_prefix() {
        Some(prefix) => LineBreakAction::Continue(prefix),
        None => LineBreakAction::Default,
    }
}

/// Handle a line break at the caret.
///
/// Returns the new state, or `None` when the host should insert its own
/// line break. With an active selection the host's default (replace the
/// selection) applies.
pub fn continue_list(state: &EditorState) -> Option<EditorState> {
    if state.has_selection() {
        return None;
    }

    let caret = state.caret();
    let span = line_span_at(&state.text, caret);

    match line_break_action(span.text(&state.text)) {
        LineBreakAction::Default => None,
        LineBreakAction::Terminate => {
            let mut text = String::with_capacity(state.text.len());
            text.push_str(&state.text[..span.start]);
            text.push_str(&state.text[span.end..]);
            Some(EditorState::new(text, span.start))
        }
        LineBreakAction::Continue(prefix) => {
            let mut text = String::with_capacity(state.text.len() + prefix.len() + 1);
            text.push_str(&state.text[..caret]);
            text.push('\n');
            text.push_str(&prefix);
            text.push_str(&state.text[caret..]);
            let caret = caret + 1 + prefix.len();
            Some(EditorState::new(text, caret))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enter_at_end(text: &str) -> Option<EditorState> {
        continue_list(&EditorState::new(text.to_string(), text.len()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Grammar
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_task_item() {
        let item = parse_list_item("  * [x] shipped").unwrap();
        assert_eq!(item.indent, "  ");
        assert_eq!(item.marker, ListMarker::Task { bullet: '*' });
        assert_eq!(item.content, "shipped");
    }

    #[test]
    fn test_parse_bullet_and_ordered() {
        let item = parse_list_item("+ plus").unwrap();
        assert_eq!(item.marker, ListMarker::Bullet { bullet: '+' });

        let item = parse_list_item("\t42. answer").unwrap();
        assert_eq!(item.indent, "\t");
        assert_eq!(item.marker, ListMarker::Ordered { number: 42 });
        assert_eq!(item.content, "answer");
    }

    #[test]
    fn test_marker_needs_trailing_space() {
        assert!(parse_list_item("-").is_none());
        assert!(parse_list_item("3.").is_none());
        assert!(parse_list_item("plain text").is_none());
    }

    #[test]
    fn test_plus_task_reads_as_bullet() {
        let item = parse_list_item("+ [ ] maybe").unwrap();
        assert_eq!(item.marker, ListMarker::Bullet { bullet: '+' });
    }

    #[test]
    fn test_huge_ordinal_is_not_an_item() {
        assert!(parse_list_item("99999999999999999999999. big").is_none());
    }

    #[test]
    fn test_max_ordinal_has_no_successor() {
        let line = format!("{}. last", u64::MAX);
        assert_eq!(line_break_action(&line), LineBreakAction::Default);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Continuation
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_task_continues_unchecked() {
        let next = enter_at_end("- [ ] buy milk").unwrap();
        assert_eq!(next.text, "- [ ] buy milk\n- [ ] ");
        assert_eq!(next.caret(), next.text.len());

        let next = enter_at_end("- [x] done").unwrap();
        assert_eq!(next.text, "- [x] done\n- [ ] ");
    }

    #[test]
    fn test_bullet_keeps_indent_and_bullet() {
        let next = enter_at_end("    * nested").unwrap();
        assert_eq!(next.text, "    * nested\n    * ");
    }

    #[test]
    fn test_ordered_increments() {
        let next = enter_at_end("3. third item").unwrap();
        assert_eq!(next.text, "3. third item\n4. ");
        assert_eq!(next.caret(), next.text.len());
    }

    #[test]
    fn test_ordered_does_not_renumber() {
        let next = enter_at_end("1. one\n1. again").unwrap();
        assert!(next.text.ends_with("1. again\n2. "));
    }

    #[test]
    fn test_break_in_middle_of_item_splits_it() {
        let text = "- hello world";
        let state = EditorState::new(text.to_string(), 7);
        let next = continue_list(&state).unwrap();
        assert_eq!(next.text, "- hello\n-  world");
        assert_eq!(next.caret(), 10);
    }

    #[test]
    fn test_only_current_line_matters() {
        let text = "- item\nplain";
        let next = continue_list(&EditorState::new(text.to_string(), text.len()));
        assert!(next.is_none());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Termination
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_bare_bullet_terminates() {
        let next = enter_at_end("- ").unwrap();
        assert_eq!(next.text, "");
        assert_eq!(next.caret(), 0);
    }

    #[test]
    fn test_bare_task_and_ordinal_terminate() {
        let next = enter_at_end("- a\n- [ ] ").unwrap();
        assert_eq!(next.text, "- a\n");
        assert_eq!(next.caret(), 4);

        let next = enter_at_end("1. a\n2.   ").unwrap();
        assert_eq!(next.text, "1. a\n");
    }

    #[test]
    fn test_terminate_keeps_following_lines() {
        let text = "- a\n  - \nafter";
        let state = EditorState::new(text.to_string(), 8);
        let next = continue_list(&state).unwrap();
        assert_eq!(next.text, "- a\n\nafter");
        assert_eq!(next.caret(), 4);
    }

    #[test]
    fn test_plain_line_defers() {
        assert!(enter_at_end("just text").is_none());
        assert!(enter_at_end("").is_none());
    }

    #[test]
    fn test_selection_defers() {
        let mut state = EditorState::new("- item".to_string(), 6);
        state.selection = Some((2, 6));
        assert!(continue_list(&state).is_none());
    }
}
