//! Live preview for PaperSmith
//!
//! Turns the buffer into the HTML fragment shown next to the editor and
//! decides when to refresh it.

mod debounce;
mod math;
mod render;

pub use debounce::{PreviewScheduler, DEFAULT_PREVIEW_DEBOUNCE};
pub use math::katex_nodes;
pub use render::{render_preview, PreviewOptions};
