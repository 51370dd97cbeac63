//! Configuration module for PaperSmith
//!
//! User preferences with JSON persistence in the platform config directory.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
