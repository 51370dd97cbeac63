//! Document Export Module for PaperSmith
//!
//! Exports produce a standalone HTML document: page margins as print CSS
//! and math typeset by KaTeX on load. Printing it from a browser gives
//! the PDF. Word conversion is left to external tools.
//!
//! # Architecture
//!
//! - `html.rs` - HTML document generation and page layout
//! - `filename.rs` - Default export names and target directory

pub mod filename;
pub mod html;

pub use filename::{resolve_export_path, suggested_filename};
pub use html::{export_html, generate_html_document, PageLayout};
