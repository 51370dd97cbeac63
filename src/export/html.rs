//! HTML Export Generation
//!
//! This module generates complete HTML documents from markdown content: the
//! preview body, page CSS carrying the configured margins and the KaTeX
//! bootstrap that typesets math once the page loads. The same document is
//! what a browser prints to PDF.

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::preview::{render_preview, PreviewOptions};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// KaTeX stylesheet
pub const KATEX_CSS_URL: &str = "https://cdn.staticfile.org/KaTeX/0.16.9/katex.min.css";

/// KaTeX script
pub const KATEX_JS_URL: &str = "https://cdn.staticfile.org/KaTeX/0.16.9/katex.min.js";

// ─────────────────────────────────────────────────────────────────────────────
// Page Layout
// ─────────────────────────────────────────────────────────────────────────────

/// Page geometry for the exported document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    /// Top and bottom margin in centimetres
    pub margin_v: f32,
    /// Left and right margin in centimetres
    pub margin_h: f32,
    /// Pad the on-screen body by the margins (otherwise a 20px gutter)
    pub show_margins_on_screen: bool,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for PageLayout {
    fn from(settings: &Settings) -> Self {
        Self {
            margin_v: settings.margin_v,
            margin_h: settings.margin_h,
            show_margins_on_screen: settings.show_preview_margins,
        }
    }
}

impl PageLayout {
    /// Stylesheet for this layout.
    pub fn css(&self) -> String {
        let (pad_v, pad_h) = if self.show_margins_on_screen {
            (format!("{}cm", self.margin_v), format!("{}cm", self.margin_h))
        } else {
            ("20px".to_string(), "20px".to_string())
        };

        format!(
            "@page {{ margin: {v}cm {h}cm; }}\n\
             @media screen {{ body {{ padding: {pad_v} {pad_h}; }} }}\n\
             @media print {{ body {{ margin: 0; padding: 0; }} }}\n\
             {base}",
            v = self.margin_v,
            h = self.margin_h,
            pad_v = pad_v,
            pad_h = pad_h,
            base = BASE_CSS,
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HTML Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Generate a complete HTML document from markdown content.
///
/// # Arguments
///
/// * `markdown` - The markdown source text
/// * `title` - Optional document title
/// * `layout` - Page margins
pub fn generate_html_document(
    markdown: &str,
    title: Option<&str>,
    layout: &PageLayout,
) -> Result<String> {
    let body = render_preview(markdown, &PreviewOptions::default())?;
    let doc_title = title.unwrap_or("Exported Document");

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="PaperSmith">
    <title>{title}</title>
    <link rel="stylesheet" href="{katex_css}">
    <script src="{katex_js}"></script>
    <style>
{css}
    </style>
</head>
<body>
{body}
<script>
{bootstrap}
</script>
</body>
</html>"#,
        title = html_escape(doc_title),
        katex_css = KATEX_CSS_URL,
        katex_js = KATEX_JS_URL,
        css = layout.css(),
        body = body,
        bootstrap = KATEX_BOOTSTRAP,
    );

    Ok(html)
}

/// Write `markdown` as a standalone HTML document to `target`.
///
/// The document title is the target's file stem.
pub fn export_html(markdown: &str, target: &Path, layout: &PageLayout) -> Result<PathBuf> {
    if markdown.trim().is_empty() {
        return Err(Error::EmptyDocument);
    }

    let title = target.file_stem().and_then(|s| s.to_str());
    let html = generate_html_document(markdown, title, layout)?;

    fs::write(target, html).map_err(|e| Error::FileWrite {
        path: target.to_path_buf(),
        source: e,
    })?;

    info!("Exported HTML to {}", target.display());
    Ok(target.to_path_buf())
}

// ─────────────────────────────────────────────────────────────────────────────
// Static Assets
// ─────────────────────────────────────────────────────────────────────────────

/// Typesets every `.katex-raw` element in place.
const KATEX_BOOTSTRAP: &str = r#"(function () {
    if (typeof katex === 'undefined') {
        console.error('[KaTeX] library not loaded');
        return;
    }
    document.querySelectorAll('.katex-raw').forEach(function (el) {
        var tex = el.textContent;
        var display = el.getAttribute('data-display') === 'true';
        try {
            katex.render(tex, el, { displayMode: display, throwOnError: false });
        } catch (err) {
            console.error('KaTeX render error:', err);
        }
    });
})();"#;

/// Typography and block styling shared by preview and export.
const BASE_CSS: &str = r#"body {
    font-family: 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
    line-height: 1.6;
    color: #24292e;
    background-color: #ffffff;
}
ul, ol { margin-top: 2px; margin-bottom: 2px; padding-left: 24px; }
li p { margin: 0; }
table { border-collapse: collapse; width: 100%; margin: 15px 0; }
th, td { border: 1px solid #dfe2e5; padding: 8px 15px; text-align: left; }
th { background-color: #f6f8fa; font-weight: bold; }
code { background-color: #f6f8fa; padding: 0.2em 0.4em; border-radius: 3px; font-family: 'Consolas', monospace; }
pre code { display: block; padding: 12px; overflow-x: auto; }
input[type=checkbox] { margin-right: 8px; vertical-align: middle; }
li:has(> input[type="checkbox"]) { list-style-type: none; margin-left: -1.3em; }
del { color: #666; }
img { max-width: 100%; height: auto; }
hr { border: 0; border-top: 2px solid #dfe2e5; margin: 20px 0; }
.katex-raw[data-display="true"] { display: block; text-align: center; margin: 10px 0; }
.katex-display { margin: 1em 0; overflow-x: auto; overflow-y: hidden; }"#;

/// HTML-escape a string.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
