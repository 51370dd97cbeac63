//! Markdown to HTML rendering for the preview pane
//!
//! Wraps comrak with the options the preview needs. The boundary repair
//! pass runs first so text that has not gone through the editor renders the
//! same way, and comrak's math nodes are handed to KaTeX afterwards.

use comrak::{markdown_to_html, Options};
use log::debug;

use crate::config::Settings;
use crate::error::Result;
use crate::markdown::plan_repairs;
use crate::preview::math::katex_nodes;

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration options for preview rendering.
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Enable GitHub Flavored Markdown tables
    pub tables: bool,
    /// Enable strikethrough syntax (~~text~~)
    pub strikethrough: bool,
    /// Enable autolink URLs and emails
    pub autolink: bool,
    /// Enable task lists (- [ ] and - [x])
    pub tasklist: bool,
    /// Enable footnotes
    pub footnotes: bool,
    /// Every source line break becomes `<br>`
    pub hard_breaks: bool,
    /// Pass raw HTML through to the output
    pub allow_raw_html: bool,
    /// Generate GitHub-style heading IDs
    pub header_ids: Option<String>,
    /// Parse `$...$` and `$$...$$` as TeX math
    pub math: bool,
    /// Insert missing block separators before rendering
    pub auto_spacing: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            autolink: true,
            tasklist: true,
            footnotes: true,
            hard_breaks: true,
            allow_raw_html: true,
            header_ids: Some(String::new()),
            math: true,
            auto_spacing: true,
        }
    }
}

impl From<&Settings> for PreviewOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            auto_spacing: settings.auto_spacing,
            ..Self::default()
        }
    }
}

impl PreviewOptions {
    /// Convert to comrak Options.
    fn to_comrak_options(&self) -> Options {
        let mut options = Options::default();

        // Extension options
        options.extension.strikethrough = self.strikethrough;
        options.extension.table = self.tables;
        options.extension.autolink = self.autolink;
        options.extension.tasklist = self.tasklist;
        options.extension.footnotes = self.footnotes;
        options.extension.header_ids = self.header_ids.clone();
        options.extension.math_dollars = self.math;

        // Render options
        options.render.hardbreaks = self.hard_breaks;
        options.render.unsafe_ = self.allow_raw_html;

        options
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Render markdown to an HTML fragment for the preview body.
///
/// Math spans come back as `katex-raw` elements for the browser-side
/// KaTeX bootstrap to typeset.
pub fn render_preview(markdown: &str, options: &PreviewOptions) -> Result<String> {
    let spaced;
    let mut source = markdown;
    if options.auto_spacing {
        let plan = plan_repairs(markdown);
        if !plan.is_empty() {
            debug!("preview: {} separator(s) added for rendering", plan.len());
            spaced = plan.apply(markdown, 0).0;
            source = &spaced;
        }
    }

    let html = markdown_to_html(source, &options.to_comrak_options());

    Ok(if options.math { katex_nodes(&html) } else { html })
}
