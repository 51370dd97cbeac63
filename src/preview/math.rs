//! TeX math hand-off to KaTeX
//!
//! comrak parses `$...$` and `$$...$$` itself (`math_dollars`) and emits the
//! escaped TeX inside `<span data-math-style="inline|display">`. Those nodes
//! are rewritten into the `katex-raw` elements the page bootstrap typesets.

const COMRAK_INLINE: &str = r#"<span data-math-style="inline">"#;
const COMRAK_DISPLAY: &str = r#"<span data-math-style="display">"#;

/// Opening tag of an inline math element.
const KATEX_INLINE: &str = r#"<span class="katex-raw" data-display="false">"#;
/// Opening tag of a display math element.
const KATEX_DISPLAY: &str = r#"<span class="katex-raw" data-display="true">"#;

/// Turn comrak math nodes into elements KaTeX renders in place.
///
/// Only the opening tags change; the closing `</span>` and the escaped TeX
/// are already what KaTeX reads back through `textContent`.
pub fn katex_nodes(html: &str) -> String {
    if !html.contains("data-math-style") {
        return html.to_string();
    }
    html.replace(COMRAK_INLINE, KATEX_INLINE)
        .replace(COMRAK_DISPLAY, KATEX_DISPLAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_node() {
        let html = r#"<p>Area <span data-math-style="inline">\pi r^2</span></p>"#;
        assert_eq!(
            katex_nodes(html),
            r#"<p>Area <span class="katex-raw" data-display="false">\pi r^2</span></p>"#
        );
    }

    #[test]
    fn test_display_node() {
        let html = r#"<p><span data-math-style="display">E=mc^2</span></p>"#;
        assert_eq!(
            katex_nodes(html),
            r#"<p><span class="katex-raw" data-display="true">E=mc^2</span></p>"#
        );
    }

    #[test]
    fn test_html_without_math_is_unchanged() {
        let html = "<p>costs $5</p>\n";
        assert_eq!(katex_nodes(html), html);
    }

    #[test]
    fn test_code_elements_are_not_rewritten() {
        // Code-block math keeps its own tag.
        let html = r#"<pre><code data-math-style="display">x</code></pre>"#;
        assert_eq!(katex_nodes(html), html);
    }
}
