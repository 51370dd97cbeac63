//! PaperSmith - markdown editing core
//!
//! Keeps a markdown buffer renderable while it is being typed: blank lines
//! go in wherever two adjacent blocks would otherwise merge, lists carry on
//! across line breaks and task checkboxes toggle when the caret lands in
//! them. Around that sit the live preview renderer, HTML export and
//! persisted settings.

pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod markdown;
pub mod preview;
pub mod state;
pub mod string_utils;
