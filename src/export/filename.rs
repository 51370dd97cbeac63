//! Export file naming
//!
//! Picks a default name for an export: the source file's stem, else the
//! document's most prominent heading, else a timestamp.

use chrono::NaiveDateTime;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::config::Settings;

/// Longest title-derived stem, in characters.
const MAX_TITLE_CHARS: usize = 50;

fn forbidden_chars_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[\\/:*?"<>|]"#).expect("forbidden chars pattern is valid"))
}

/// Heading patterns for levels 1 to 6, in that order.
fn heading_res() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        (1..=6)
            .map(|level| {
                Regex::new(&format!(r"(?m)^#{{{}}}[ \t]+(.+)$", level))
                    .expect("heading title pattern is valid")
            })
            .collect()
    })
}

/// Turn heading text into something safe to use as a file stem.
fn clean_title(title: &str) -> String {
    let replaced = forbidden_chars_re().replace_all(title.trim(), "_");
    replaced
        .trim_matches(|c| c == ' ' || c == '.')
        .chars()
        .take(MAX_TITLE_CHARS)
        .collect()
}

/// First usable heading title, preferring higher levels.
fn title_from_headings(content: &str) -> Option<String> {
    heading_res().iter().find_map(|re| {
        let title = clean_title(re.captures(content)?.get(1)?.as_str());
        (!title.is_empty()).then_some(title)
    })
}

/// Suggest a file name (with `extension`) for exporting `content`.
pub fn suggested_filename(
    current_path: Option<&Path>,
    content: &str,
    extension: &str,
    now: NaiveDateTime,
) -> String {
    let stem = current_path
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .or_else(|| title_from_headings(content))
        .unwrap_or_else(|| format!("Export_{}", now.format("%Y%m%d_%H%M")));

    format!("{}.{}", stem, extension)
}

/// Place `filename` in the configured export directory when that
/// directory exists; otherwise return it unchanged.
pub fn resolve_export_path(settings: &Settings, filename: &str) -> PathBuf {
    match &settings.default_export_path {
        Some(dir) if dir.is_dir() => dir.join(filename),
        _ => PathBuf::from(filename),
    }
}
