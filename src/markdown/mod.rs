//! Markdown structure engine
//!
//! Line-level markdown grammar and the edits built on it:
//!
//! - [`blocks`]: classify a line and decide whether two adjacent lines need
//!   a blank line between them
//! - [`repair`]: whole-buffer pass inserting those blank lines
//! - [`lists`]: list continuation and termination on line break
//! - [`tasks`]: checkbox toggling by caret placement
//! - [`formatting`]: toolbar-style formatting commands
//!
//! Everything here is pure: text and caret in, text and caret out.

pub mod blocks;
pub mod formatting;
pub mod lists;
pub mod repair;
pub mod tasks;

pub use blocks::{classify, conflicts, is_fence_line, needs_separator, BlockType, Classification};
pub use formatting::{apply_format, FormatCommand, FormatResult};
pub use lists::{continue_list, line_break_action, parse_list_item, LineBreakAction, ListItem, ListMarker};
pub use repair::{plan_repairs, repair, RepairPlan};
pub use tasks::{find_checkbox, toggle_task, Checkbox};
