//! Editing session
//!
//! [`Editor`] is the in-memory editing surface. It owns the [`Document`],
//! turns edits into notifications for its [`EditorHooks`] and applies
//! whatever the hooks hand back.
//!
//! Two flags keep hook edits from feeding back into the hooks:
//!
//! - `is_fixing` is raised while a content-changed fix is being applied, so
//!   the notification that edit produces is ignored.
//! - `signals_blocked` suppresses notifications altogether. A task toggle is
//!   applied with signals blocked and followed by one explicit
//!   content-changed notification.

use std::time::Instant;

use log::debug;

use crate::config::Settings;
use crate::editor::hooks::{AutoFormatOptions, AutoFormatter, EditorHooks};
use crate::markdown::{apply_format, FormatCommand};
use crate::preview::PreviewScheduler;
use crate::state::{Document, EditorState};
use crate::string_utils::floor_char_boundary;

/// Editing surface wired to a set of hooks.
#[derive(Debug)]
pub struct Editor<H: EditorHooks = AutoFormatter> {
    document: Document,
    hooks: H,
    is_fixing: bool,
    signals_blocked: bool,
    preview: PreviewScheduler,
}

impl Editor<AutoFormatter> {
    /// Editor with the auto-formatter configured from `settings`.
    pub fn from_settings(document: Document, settings: &Settings) -> Self {
        let hooks = AutoFormatter::new(AutoFormatOptions::from(settings));
        let mut editor = Self::new(document, hooks);
        editor.preview.set_interval(settings.preview_debounce());
        editor
    }
}

impl<H: EditorHooks> Editor<H> {
    pub fn new(document: Document, hooks: H) -> Self {
        Self {
            document,
            hooks,
            is_fixing: false,
            signals_blocked: false,
            preview: PreviewScheduler::default(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn text(&self) -> &str {
        self.document.content()
    }

    pub fn caret(&self) -> usize {
        self.document.caret()
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn is_fixing(&self) -> bool {
        self.is_fixing
    }

    /// Block or unblock notifications. Returns the previous value.
    pub fn block_signals(&mut self, blocked: bool) -> bool {
        std::mem::replace(&mut self.signals_blocked, blocked)
    }

    pub fn signals_blocked(&self) -> bool {
        self.signals_blocked
    }

    /// Whether the preview should be re-rendered now.
    pub fn poll_preview(&mut self, now: Instant) -> bool {
        self.preview.poll(now)
    }

    pub fn preview_scheduler(&self) -> &PreviewScheduler {
        &self.preview
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Typing
    // ─────────────────────────────────────────────────────────────────────────
    // Edits notify content changes only. The caret hook fires on explicit
    // caret moves, so typing inside `[]` never toggles a task.

    /// Type `text` at the caret, replacing any selection.
    pub fn insert_text(&mut self, text: &str) {
        let (start, end) = self.selected_range();
        let content = self.document.content();

        let mut next = String::with_capacity(content.len() + text.len());
        next.push_str(&content[..start]);
        next.push_str(text);
        next.push_str(&content[end..]);

        self.commit(EditorState::new(next, start + text.len()));
    }

    /// Delete the selection, or the character before the caret.
    pub fn backspace(&mut self) {
        let (start, end) = self.selected_range();
        let content = self.document.content();

        let start = if start == end {
            if start == 0 {
                return;
            }
            floor_char_boundary(content, start - 1)
        } else {
            start
        };

        let mut next = String::with_capacity(content.len());
        next.push_str(&content[..start]);
        next.push_str(&content[end..]);
        self.commit(EditorState::new(next, start));
    }

    /// Press Enter: the line-break hook gets the first say, otherwise a
    /// plain line break is typed.
    pub fn press_enter(&mut self) {
        let state = self.document.state();
        match self.hooks.on_line_break(&state) {
            Some(next) => {
                debug!("line break handled by hook");
                self.commit(next);
            }
            None => self.insert_text("\n"),
        }
    }

    /// Replace the whole buffer, caret at the start.
    pub fn set_text(&mut self, text: &str) {
        self.commit(EditorState::new(text.to_string(), 0));
    }

    /// Apply a toolbar formatting command to the selection or caret.
    pub fn format(&mut self, command: FormatCommand) {
        let selection = self
            .document
            .selection()
            .or(Some((self.caret(), self.caret())));
        let result = apply_format(self.document.content(), selection, command);
        self.commit(EditorState::new(result.text, result.cursor));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Caret and Selection
    // ─────────────────────────────────────────────────────────────────────────

    /// Move the caret, dropping any selection.
    pub fn set_caret(&mut self, caret: usize) {
        self.document.set_caret(caret);
        self.caret_moved();
    }

    /// Select `anchor..head`; the caret follows the head.
    pub fn select(&mut self, anchor: usize, head: usize) {
        self.document.set_selection(anchor, head);
        self.caret_moved();
    }

    pub fn clear_selection(&mut self) {
        self.document.clear_selection();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // History
    // ─────────────────────────────────────────────────────────────────────────

    /// Undo one step. Hooks are not consulted: the restored text is exactly
    /// what the snapshot held, even if it would not pass the repair pass.
    pub fn undo(&mut self) -> bool {
        let undone = self.document.undo();
        if undone {
            self.preview.mark_dirty(Instant::now());
        }
        undone
    }

    /// Redo one step, without consulting hooks.
    pub fn redo(&mut self) -> bool {
        let redone = self.document.redo();
        if redone {
            self.preview.mark_dirty(Instant::now());
        }
        redone
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────────────────────

    /// Selection as an ordered range, or the caret as an empty one.
    fn selected_range(&self) -> (usize, usize) {
        match self.document.selection() {
            Some((a, b)) => (a.min(b), a.max(b)),
            None => (self.caret(), self.caret()),
        }
    }

    /// Apply an edit as one undo step and notify.
    fn commit(&mut self, next: EditorState) {
        if self.document.apply(next) {
            self.content_changed();
        }
    }

    fn content_changed(&mut self) {
        if self.signals_blocked {
            return;
        }
        self.preview.mark_dirty(Instant::now());
        if self.is_fixing {
            return;
        }

        let state = self.document.state();
        if let Some(fixed) = self.hooks.on_content_changed(&state) {
            self.is_fixing = true;
            self.commit(fixed);
            self.is_fixing = false;
        }
    }

    fn caret_moved(&mut self) {
        if self.signals_blocked {
            return;
        }
        let state = self.document.state();
        if let Some(next) = self.hooks.on_caret_moved(&state) {
            let was_blocked = self.block_signals(true);
            let changed = self.document.apply(next);
            self.block_signals(was_blocked);
            if changed {
                self.content_changed();
            }
        }
    }
}
