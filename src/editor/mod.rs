//! Editor module for PaperSmith
//!
//! The event hooks the editing surface calls and the in-memory session
//! that drives them.

mod hooks;
mod session;

pub use hooks::{AutoFormatOptions, AutoFormatter, EditorHooks};
pub use session::Editor;
