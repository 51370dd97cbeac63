//! Markdown Formatting Operations
//!
//! Toolbar-style commands applied to raw text. Each takes the full text and
//! the current selection and returns the new text with a caret position.
//! The result goes through the same content-changed path as typing, so any
//! block separators a command makes necessary are added by the repair pass.
//!
//! # Usage
//! ```
//! use papersmith::markdown::formatting::{apply_format, FormatCommand};
//!
//! let result = apply_format("Hello world", Some((0, 5)), FormatCommand::Bold);
//! assert_eq!(result.text, "**Hello** world");
//! ```

use regex::Regex;
use std::sync::OnceLock;

use crate::string_utils::{ceil_char_boundary, floor_char_boundary, line_span_at};

// ─────────────────────────────────────────────────────────────────────────────
// Format Command Enum
// ─────────────────────────────────────────────────────────────────────────────

/// Formatting commands that can be applied to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    /// Bold text (**text**)
    Bold,
    /// Italic text (*text*)
    Italic,
    /// Strikethrough (~~text~~)
    Strikethrough,
    /// Heading level 1-6
    Heading(u8),
    /// `- ` on every selected line
    BulletList,
    /// `1. `, `2. `, ... on the selected lines
    NumberedList,
    /// `- [ ] ` on every selected line
    TaskList,
    /// `---` on its own paragraph
    HorizontalRule,
    /// Empty table skeleton, clamped to [`MAX_TABLE_ROWS`] x [`MAX_TABLE_COLS`]
    Table { rows: usize, cols: usize },
    /// `![alt](path)` at the caret; a selection becomes the alt text
    Image { path: String },
}

/// Largest table the table command builds, counting the header row.
pub const MAX_TABLE_ROWS: usize = 100;
/// Widest table the table command builds.
pub const MAX_TABLE_COLS: usize = 20;

/// Alt text used when nothing is selected.
const DEFAULT_IMAGE_ALT: &str = "Image description";

// ─────────────────────────────────────────────────────────────────────────────
// Format Result
// ─────────────────────────────────────────────────────────────────────────────

/// Result of applying a formatting command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatResult {
    /// The new text after formatting
    pub text: String,
    /// New caret position (byte offset)
    pub cursor: usize,
}

impl FormatResult {
    fn with_cursor(text: String, cursor: usize) -> Self {
        Self { text, cursor }
    }
}

/// Normalise an optional selection to an ordered, boundary-safe range.
/// `None` means "caret at end of text".
fn selection_range(text: &str, selection: Option<(usize, usize)>) -> (usize, usize) {
    let (start, end) = selection.unwrap_or((text.len(), text.len()));
    let (start, end) = if start > end {
        (end, start)
    } else {
        (start, end)
    };
    (
        floor_char_boundary(text, start),
        ceil_char_boundary(text, end),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// Apply a formatting command.
///
/// # Arguments
/// * `text` - The full text content
/// * `selection` - Selection `(start, end)` in byte offsets; equal ends mean a caret
/// * `command` - The formatting command to apply
pub fn apply_format(
    text: &str,
    selection: Option<(usize, usize)>,
    command: FormatCommand,
) -> FormatResult {
    let range = selection_range(text, selection);
    match command {
        FormatCommand::Bold => wrap_selection(text, range, "**", "**"),
        FormatCommand::Italic => wrap_selection(text, range, "*", "*"),
        FormatCommand::Strikethrough => wrap_selection(text, range, "~~", "~~"),
        FormatCommand::Heading(level) => apply_heading(text, range, level),
        FormatCommand::BulletList => apply_list_prefix(text, range, ListPrefix::Bullet),
        FormatCommand::NumberedList => apply_list_prefix(text, range, ListPrefix::Numbered),
        FormatCommand::TaskList => apply_list_prefix(text, range, ListPrefix::Task),
        FormatCommand::HorizontalRule => insert_rule(text, range),
        FormatCommand::Table { rows, cols } => insert_table(text, range, rows, cols),
        FormatCommand::Image { path } => insert_image(text, range, &path),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inline
// ─────────────────────────────────────────────────────────────────────────────

/// Wrap the selection in delimiters. Without a selection the empty pair is
/// inserted and the caret placed between the delimiters.
fn wrap_selection(text: &str, (start, end): (usize, usize), prefix: &str, suffix: &str) -> FormatResult {
    let selected = &text[start..end];
    let new_text = format!("{}{}{}{}{}", &text[..start], prefix, selected, suffix, &text[end..]);

    let cursor = if selected.is_empty() {
        start + prefix.len()
    } else {
        start + prefix.len() + selected.len() + suffix.len()
    };
    FormatResult::with_cursor(new_text, cursor)
}

// ─────────────────────────────────────────────────────────────────────────────
// Headings
// ─────────────────────────────────────────────────────────────────────────────

/// Replace any heading marker on the caret's line with `level` hashes.
fn apply_heading(text: &str, (start, _end): (usize, usize), level: u8) -> FormatResult {
    let level = level.clamp(1, 6) as usize;
    let span = line_span_at(text, start);
    let line = span.text(text);

    let content = line.trim_start_matches('#').trim_start();
    let content = if line.starts_with('#') { content } else { line };

    let new_line = format!("{} {}", "#".repeat(level), content);
    let new_text = format!("{}{}{}", &text[..span.start], new_line, &text[span.end..]);
    FormatResult::with_cursor(new_text, span.start + new_line.len())
}

// ─────────────────────────────────────────────────────────────────────────────
// Lists
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListPrefix {
    Bullet,
    Numbered,
    Task,
}

fn list_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(?:[-*+] \[[ xX]\]|[0-9]+\.|[-*+])\s+").expect("list marker pattern is valid")
    })
}

/// Whether a line already starts with any list marker.
fn is_list_line(line: &str) -> bool {
    list_marker_re().is_match(line)
}

/// Strip indentation and any existing list marker.
fn strip_list_marker(line: &str) -> &str {
    match list_marker_re().find(line) {
        Some(m) => &line[m.end()..],
        None => line.trim_start(),
    }
}

/// Turn every line touched by the selection into a list item.
///
/// When the line above the first one is a non-blank, non-list line, a blank
/// line goes in first so the new list does not read as a paragraph
/// continuation.
fn apply_list_prefix(text: &str, (start, end): (usize, usize), kind: ListPrefix) -> FormatResult {
    let first = line_span_at(text, start);
    let last = line_span_at(text, end);

    let needs_gap = first.start > 0 && {
        let above = line_span_at(text, first.start - 1).text(text);
        !above.trim().is_empty() && !is_list_line(above)
    };

    let block = &text[first.start..last.end];
    let new_lines: Vec<String> = block
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            let content = strip_list_marker(line);
            match kind {
                ListPrefix::Bullet => format!("- {}", content),
                ListPrefix::Numbered => format!("{}. {}", i + 1, content),
                ListPrefix::Task => format!("- [ ] {}", content),
            }
        })
        .collect();
    let new_block = new_lines.join("\n");

    let gap = if needs_gap { "\n" } else { "" };
    let new_text = format!(
        "{}{}{}{}",
        &text[..first.start],
        gap,
        new_block,
        &text[last.end..]
    );
    let cursor = first.start + gap.len() + new_block.len();
    FormatResult::with_cursor(new_text, cursor)
}

// ─────────────────────────────────────────────────────────────────────────────
// Block Inserts
// ─────────────────────────────────────────────────────────────────────────────

/// Insert a horizontal rule after the caret's line, padded by blank lines.
fn insert_rule(text: &str, (start, _end): (usize, usize)) -> FormatResult {
    let span = line_span_at(text, start);
    let insert = if span.text(text).trim().is_empty() {
        "\n---\n\n"
    } else {
        "\n\n---\n\n"
    };
    let new_text = format!("{}{}{}", &text[..span.end], insert, &text[span.end..]);
    FormatResult::with_cursor(new_text, span.end + insert.len())
}

/// Build a table skeleton: header row, divider and `rows - 1` body rows.
///
/// `rows` is clamped to `1..=MAX_TABLE_ROWS` and `cols` to `1..=MAX_TABLE_COLS`.
pub fn table_skeleton(rows: usize, cols: usize) -> String {
    let rows = rows.clamp(1, MAX_TABLE_ROWS);
    let cols = cols.clamp(1, MAX_TABLE_COLS);
    let header: Vec<String> = (1..=cols).map(|i| format!("Header {}", i)).collect();
    let divider = vec!["---"; cols];
    let blank = vec!["   "; cols];

    let mut table = format!("\n| {} |\n| {} |\n", header.join(" | "), divider.join(" | "));
    for _ in 1..rows {
        table.push_str(&format!("| {} |\n", blank.join(" | ")));
    }
    table
}

/// Insert a table skeleton at the caret, replacing any selection.
fn insert_table(text: &str, (start, end): (usize, usize), rows: usize, cols: usize) -> FormatResult {
    let table = table_skeleton(rows, cols);
    let new_text = format!("{}{}{}", &text[..start], table, &text[end..]);
    FormatResult::with_cursor(new_text, start + table.len())
}

/// Insert an image link at the caret. Windows path separators become `/`
/// so the link works in the browser.
fn insert_image(text: &str, (start, end): (usize, usize), path: &str) -> FormatResult {
    let selected = text[start..end].trim();
    let alt = if selected.is_empty() || selected.contains('\n') {
        DEFAULT_IMAGE_ALT
    } else {
        selected
    };
    let link = format!("![{}]({})", alt, path.replace('\\', "/"));
    let new_text = format!("{}{}{}", &text[..start], link, &text[end..]);
    FormatResult::with_cursor(new_text, start + link.len())
}
