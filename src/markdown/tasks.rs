//! Task checkbox toggling by caret placement
//!
//! Clicking into the brackets of a task item flips its checked state. The
//! host reports this as a plain caret move, so the check runs on every
//! caret change without a selection.

use regex::Regex;
use std::sync::OnceLock;

use crate::state::EditorState;
use crate::string_utils::line_span_at;

fn checkbox_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*[-*]\s*)\[([ xX]*)\]").expect("checkbox pattern is valid"))
}

/// Location of a task checkbox within its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkbox {
    /// Byte index of `[` within the line.
    pub open: usize,
    /// Byte index of `]` within the line.
    pub close: usize,
    pub checked: bool,
}

impl Checkbox {
    /// Strictly after `[`, at most on `]`.
    pub fn contains_column(&self, column: usize) -> bool {
        self.open < column && column <= self.close
    }

    /// Bracket text after a toggle.
    pub fn toggled(&self) -> &'static str {
        if self.checked {
            "[ ]"
        } else {
            "[x]"
        }
    }
}

/// Find the checkbox of a task line.
///
/// Any run of spaces and `x`/`X` counts as box content; it is checked when
/// anything other than spaces is inside.
pub fn find_checkbox(line: &str) -> Option<Checkbox> {
    let caps = checkbox_re().captures(line)?;
    let open = caps.get(1)?.end();
    let close = caps.get(0)?.end() - 1;
    let checked = !caps.get(2)?.as_str().trim().is_empty();
    Some(Checkbox {
        open,
        close,
        checked,
    })
}

/// Flip the checkbox under the caret, if there is one.
///
/// Only the bracket span is rewritten. The caret ends up just past the new
/// closing bracket so that the next caret event does not toggle again.
pub fn toggle_task(state: &EditorState) -> Option<EditorState> {
    if state.has_selection() {
        return None;
    }

    let caret = state.caret();
    let span = line_span_at(&state.text, caret);
    let line = span.text(&state.text);
    let checkbox = find_checkbox(line)?;

    if !checkbox.contains_column(span.column_of(caret)) {
        return None;
    }

    let replacement = checkbox.toggled();
    let bracket_start = span.start + checkbox.open;
    let bracket_end = span.start + checkbox.close + 1;

    let mut text = String::with_capacity(state.text.len() + replacement.len());
    text.push_str(&state.text[..bracket_start]);
    text.push_str(replacement);
    text.push_str(&state.text[bracket_end..]);

    let line_end = span.end - (bracket_end - bracket_start) + replacement.len();
    let caret = (bracket_start + replacement.len()).min(line_end);
    Some(EditorState::new(text, caret))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(text: &str, caret: usize) -> Option<EditorState> {
        toggle_task(&EditorState::new(text.to_string(), caret))
    }

    #[test]
    fn test_find_checkbox() {
        let cb = find_checkbox("- [ ] done?").unwrap();
        assert_eq!((cb.open, cb.close, cb.checked), (2, 4, false));

        let cb = find_checkbox("  *[X] tight").unwrap();
        assert_eq!((cb.open, cb.close, cb.checked), (3, 5, true));

        assert!(find_checkbox("plain [ ] text").is_none());
        assert!(find_checkbox("1. [ ] ordered").is_none());
    }

    #[test]
    fn test_toggle_on_and_off() {
        let checked = click("- [ ] done?", 3).unwrap();
        assert_eq!(checked.text, "- [x] done?");
        assert_eq!(checked.caret(), 5);

        let unchecked = click(&checked.text, 4).unwrap();
        assert_eq!(unchecked.text, "- [ ] done?");
    }

    #[test]
    fn test_caret_bounds() {
        // On the opening bracket itself: no toggle.
        assert!(click("- [ ] a", 2).is_none());
        // Right after the opening bracket and on the closing bracket: toggle.
        assert!(click("- [ ] a", 3).is_some());
        assert!(click("- [ ] a", 4).is_some());
        // Past the closing bracket: no toggle.
        assert!(click("- [ ] a", 5).is_none());
        assert!(click("- [ ] a", 7).is_none());
    }

    #[test]
    fn test_toggle_on_later_line_keeps_other_lines() {
        let text = "intro\n  - [x] shipped\nend";
        let state = click(text, 11).unwrap();
        assert_eq!(state.text, "intro\n  - [ ] shipped\nend");
        assert_eq!(&state.text[state.caret()..], " shipped\nend");
    }

    #[test]
    fn test_odd_box_content_is_normalised() {
        let state = click("- [xx] twice", 3).unwrap();
        assert_eq!(state.text, "- [ ] twice");
        assert_eq!(state.caret(), 5);

        let state = click("- [] empty", 3).unwrap();
        assert_eq!(state.text, "- [x] empty");
    }

    #[test]
    fn test_selection_suppresses_toggle() {
        let mut state = EditorState::new("- [ ] a".to_string(), 3);
        state.selection = Some((3, 7));
        assert!(toggle_task(&state).is_none());
    }

    #[test]
    fn test_non_task_lines_are_ignored() {
        assert!(click("- item", 1).is_none());
        assert!(click("", 0).is_none());
    }
}
