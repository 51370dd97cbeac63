//! Document state for PaperSmith
//!
//! Two shapes of the same data live here:
//!
//! - [`EditorState`], the `(text, caret, selection)` value that the editing
//!   hooks receive and return. It has no history and no identity.
//! - [`Document`], the in-memory editing surface: the live text, file
//!   association and a snapshot undo stack in which one grouped edit is one
//!   step.

use crate::error::{Error, Result};
use crate::string_utils::floor_char_boundary;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Editor State (Value)
// ─────────────────────────────────────────────────────────────────────────────

/// Buffer text with caret and optional selection, all in byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorState {
    pub text: String,
    caret: usize,
    /// Selection as `(anchor, head)`; `None` or an empty range means no selection.
    pub selection: Option<(usize, usize)>,
}

impl EditorState {
    /// Create a state with no selection. The caret is clamped onto a
    /// character boundary inside the text.
    pub fn new(text: String, caret: usize) -> Self {
        let caret = floor_char_boundary(&text, caret);
        Self {
            text,
            caret,
            selection: None,
        }
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn has_selection(&self) -> bool {
        matches!(self.selection, Some((a, b)) if a != b)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Document (Editing Surface)
// ─────────────────────────────────────────────────────────────────────────────

/// One undo step.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    content: String,
    caret: usize,
}

/// Live document owned by the editing session.
#[derive(Debug, Clone)]
pub struct Document {
    /// File path (None for unsaved/new documents)
    pub path: Option<PathBuf>,
    content: String,
    /// Content at the last load or save, for modification tracking
    original_content: String,
    caret: usize,
    selection: Option<(usize, usize)>,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_undo_size: usize,
    /// Incremented on every content change so observers can tell
    /// whether they are looking at stale text.
    content_version: u64,
}

impl Document {
    pub const DEFAULT_MAX_UNDO: usize = 100;

    /// Create a new empty document.
    pub fn new() -> Self {
        Self::with_content(None, String::new())
    }

    /// Create a document with content, caret at the start.
    pub fn with_content(path: Option<PathBuf>, content: String) -> Self {
        Self {
            path,
            original_content: content.clone(),
            content,
            caret: 0,
            selection: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo_size: Self::DEFAULT_MAX_UNDO,
            content_version: 0,
        }
    }

    /// Load a document from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        info!("Opened {} ({} bytes)", path.display(), content.len());
        Ok(Self::with_content(Some(path.to_path_buf()), content))
    }

    /// Write the document to its path.
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| Error::Application("Document has no file path".to_string()))?;
        self.save_as(path)
    }

    /// Write the document to `path` and associate it with that path.
    pub fn save_as(&mut self, path: PathBuf) -> Result<()> {
        fs::write(&path, &self.content).map_err(|e| Error::FileWrite {
            path: path.clone(),
            source: e,
        })?;
        info!("Saved {}", path.display());
        self.path = Some(path);
        self.mark_saved();
        Ok(())
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    /// Current value snapshot for the hooks.
    pub fn state(&self) -> EditorState {
        let mut state = EditorState::new(self.content.clone(), self.caret);
        state.selection = self.selection;
        state
    }

    /// Check if the document has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.content != self.original_content
    }

    /// Display title: file name, or "Untitled", with `*` when modified.
    pub fn title(&self) -> String {
        let name = self
            .path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled");

        if self.is_modified() {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    }

    /// Mark the current content as saved.
    pub fn mark_saved(&mut self) {
        self.original_content = self.content.clone();
    }

    /// Replace text and caret as a single undo step.
    ///
    /// Returns `false` (and records nothing) when the text is unchanged; the
    /// caret still moves.
    pub fn apply(&mut self, next: EditorState) -> bool {
        let changed = next.text != self.content;
        if changed {
            self.push_undo();
            self.redo_stack.clear();
            self.content = next.text;
            self.content_version = self.content_version.wrapping_add(1);
        }
        self.caret = floor_char_boundary(&self.content, next.caret);
        self.selection = next.selection;
        changed
    }

    /// Move the caret and drop any selection.
    pub fn set_caret(&mut self, caret: usize) {
        self.caret = floor_char_boundary(&self.content, caret);
        self.selection = None;
    }

    /// Select `anchor..head`; the caret follows the head.
    pub fn set_selection(&mut self, anchor: usize, head: usize) {
        let anchor = floor_char_boundary(&self.content, anchor);
        let head = floor_char_boundary(&self.content, head);
        self.selection = Some((anchor, head));
        self.caret = head;
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    fn push_undo(&mut self) {
        self.undo_stack.push(Snapshot {
            content: self.content.clone(),
            caret: self.caret,
        });
        if self.undo_stack.len() > self.max_undo_size {
            self.undo_stack.remove(0);
        }
    }

    /// Undo the last edit. Returns `true` if undo was performed.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(Snapshot {
            content: std::mem::replace(&mut self.content, previous.content),
            caret: self.caret,
        });
        self.caret = previous.caret;
        self.selection = None;
        self.content_version = self.content_version.wrapping_add(1);
        debug!("undo, {} step(s) left", self.undo_stack.len());
        true
    }

    /// Redo the last undone edit. Returns `true` if redo was performed.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(Snapshot {
            content: std::mem::replace(&mut self.content, next.content),
            caret: self.caret,
        });
        self.caret = next.caret;
        self.selection = None;
        self.content_version = self.content_version.wrapping_add(1);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn content_version(&self) -> u64 {
        self.content_version
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn state(text: &str, caret: usize) -> EditorState {
        EditorState::new(text.to_string(), caret)
    }

    #[test]
    fn test_editor_state_clamps_caret() {
        assert_eq!(state("abc", 99).caret(), 3);
        assert_eq!(state("på", 2).caret(), 1);
    }

    #[test]
    fn test_empty_selection_is_no_selection() {
        let mut s = state("abc", 1);
        s.selection = Some((1, 1));
        assert!(!s.has_selection());
        s.selection = Some((0, 2));
        assert!(s.has_selection());
    }

    #[test]
    fn test_new_document_title() {
        let mut doc = Document::new();
        assert_eq!(doc.title(), "Untitled");
        doc.apply(state("x", 1));
        assert_eq!(doc.title(), "Untitled*");
    }

    #[test]
    fn test_apply_is_one_undo_step() {
        let mut doc = Document::with_content(None, "a".to_string());
        assert!(doc.apply(state("a\n\nb\n\nc", 3)));
        assert_eq!(doc.undo_count(), 1);
        assert!(doc.undo());
        assert_eq!(doc.content(), "a");
        assert!(doc.redo());
        assert_eq!(doc.content(), "a\n\nb\n\nc");
        assert_eq!(doc.caret(), 3);
    }

    #[test]
    fn test_apply_without_change_records_nothing() {
        let mut doc = Document::with_content(None, "same".to_string());
        assert!(!doc.apply(state("same", 2)));
        assert_eq!(doc.undo_count(), 0);
        assert_eq!(doc.caret(), 2);
        assert_eq!(doc.content_version(), 0);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut doc = Document::new();
        doc.apply(state("1", 1));
        doc.undo();
        assert!(doc.can_redo());
        doc.apply(state("2", 1));
        assert!(!doc.can_redo());
    }

    #[test]
    fn test_undo_history_is_bounded() {
        let mut doc = Document::new();
        for i in 0..(Document::DEFAULT_MAX_UNDO + 10) {
            doc.apply(state(&i.to_string(), 0));
        }
        assert_eq!(doc.undo_count(), Document::DEFAULT_MAX_UNDO);
    }

    #[test]
    fn test_selection_moves_caret_to_head() {
        let mut doc = Document::with_content(None, "hello".to_string());
        doc.set_selection(1, 4);
        assert_eq!(doc.caret(), 4);
        assert!(doc.state().has_selection());
        doc.set_caret(2);
        assert_eq!(doc.selection(), None);
    }

    #[test]
    fn test_open_and_save_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("note.md");
        std::fs::write(&path, "# Note").unwrap();

        let mut doc = Document::open(&path).unwrap();
        assert_eq!(doc.content(), "# Note");
        assert_eq!(doc.title(), "note.md");

        doc.apply(state("# Note\n\nbody", 12));
        assert!(doc.is_modified());
        doc.save().unwrap();
        assert!(!doc.is_modified());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Note\n\nbody");
    }

    #[test]
    fn test_open_missing_file_reports_path() {
        let err = Document::open(Path::new("/definitely/not/here.md")).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut doc = Document::new();
        assert!(matches!(doc.save(), Err(Error::Application(_))));
    }
}
