//! Editor event hooks
//!
//! The editing surface reports three kinds of events. Each hook receives
//! the current state and either returns a replacement state or `None` to
//! leave things as they are (for a line break, `None` means the host
//! inserts its own line break).

use crate::config::Settings;
use crate::markdown::{continue_list, plan_repairs, toggle_task};
use crate::state::EditorState;

/// Callbacks the editing surface invokes.
pub trait EditorHooks {
    /// The buffer changed.
    fn on_content_changed(&mut self, state: &EditorState) -> Option<EditorState>;

    /// A line break is about to be inserted at the caret.
    fn on_line_break(&mut self, state: &EditorState) -> Option<EditorState>;

    /// The caret moved.
    fn on_caret_moved(&mut self, state: &EditorState) -> Option<EditorState>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Auto-Formatter
// ─────────────────────────────────────────────────────────────────────────────

/// Which automatic behaviours are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoFormatOptions {
    pub auto_spacing: bool,
    pub list_continuation: bool,
    pub task_toggle: bool,
}

impl Default for AutoFormatOptions {
    fn default() -> Self {
        Self {
            auto_spacing: true,
            list_continuation: true,
            task_toggle: true,
        }
    }
}

impl From<&Settings> for AutoFormatOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            auto_spacing: settings.auto_spacing,
            list_continuation: settings.list_continuation,
            task_toggle: settings.task_toggle,
        }
    }
}

/// Block separators, list continuation and task toggling.
#[derive(Debug, Clone, Default)]
pub struct AutoFormatter {
    options: AutoFormatOptions,
}

impl AutoFormatter {
    pub fn new(options: AutoFormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> AutoFormatOptions {
        self.options
    }
}

impl EditorHooks for AutoFormatter {
    fn on_content_changed(&mut self, state: &EditorState) -> Option<EditorState> {
        if !self.options.auto_spacing {
            return None;
        }
        let plan = plan_repairs(&state.text);
        if plan.is_empty() {
            return None;
        }
        let (text, caret) = plan.apply(&state.text, state.caret());
        let mut next = EditorState::new(text, caret);
        next.selection = state
            .selection
            .map(|(anchor, head)| (plan.map_offset(anchor), plan.map_offset(head)));
        Some(next)
    }

    fn on_line_break(&mut self, state: &EditorState) -> Option<EditorState> {
        if !self.options.list_continuation {
            return None;
        }
        continue_list(state)
    }

    fn on_caret_moved(&mut self, state: &EditorState) -> Option<EditorState> {
        if !self.options.task_toggle {
            return None;
        }
        toggle_task(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(text: &str, caret: usize) -> EditorState {
        EditorState::new(text.to_string(), caret)
    }

    #[test]
    fn test_content_changed_repairs() {
        let mut hooks = AutoFormatter::default();
        let next = hooks.on_content_changed(&state("Some text\n- item", 16)).unwrap();
        assert_eq!(next.text, "Some text\n\n- item");
        assert_eq!(next.caret(), 17);
    }

    #[test]
    fn test_content_changed_clean_buffer() {
        let mut hooks = AutoFormatter::default();
        assert!(hooks.on_content_changed(&state("- a\n- b", 0)).is_none());
    }

    #[test]
    fn test_repair_carries_selection() {
        let mut hooks = AutoFormatter::default();
        let mut s = state("Some text\n- item", 16);
        s.selection = Some((12, 16));
        let next = hooks.on_content_changed(&s).unwrap();
        assert_eq!(next.selection, Some((13, 17)));
        assert_eq!(&next.text[13..17], "item");
    }

    #[test]
    fn test_disabled_behaviours_defer() {
        let mut hooks = AutoFormatter::new(AutoFormatOptions {
            auto_spacing: false,
            list_continuation: false,
            task_toggle: false,
        });
        assert!(hooks.on_content_changed(&state("text\n- a", 0)).is_none());
        assert!(hooks.on_line_break(&state("- a", 3)).is_none());
        assert!(hooks.on_caret_moved(&state("- [ ] a", 3)).is_none());
    }

    #[test]
    fn test_options_from_settings() {
        let settings = Settings {
            list_continuation: false,
            ..Settings::default()
        };
        let options = AutoFormatOptions::from(&settings);
        assert!(options.auto_spacing);
        assert!(!options.list_continuation);
        assert!(options.task_toggle);
    }

    #[test]
    fn test_line_break_and_caret_hooks() {
        let mut hooks = AutoFormatter::default();
        let next = hooks.on_line_break(&state("3. third item", 13)).unwrap();
        assert_eq!(next.text, "3. third item\n4. ");

        let next = hooks.on_caret_moved(&state("- [ ] done?", 3)).unwrap();
        assert_eq!(next.text, "- [x] done?");
    }
}
