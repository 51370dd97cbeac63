//! User settings for PaperSmith
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON persistence.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences and application settings.
///
/// This struct is serialized to JSON and persisted to the user's config directory.
/// All fields have sensible defaults via the `Default` trait and `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Page Layout
    // ─────────────────────────────────────────────────────────────────────────
    /// Top and bottom page margin in centimetres
    pub margin_v: f32,

    /// Left and right page margin in centimetres
    pub margin_h: f32,

    /// Pad the on-screen preview by the page margins instead of a fixed gutter
    pub show_preview_margins: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────
    /// Directory exports land in when it exists; `None` means next to the source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_export_path: Option<PathBuf>,

    // ─────────────────────────────────────────────────────────────────────────
    // Auto-Formatting
    // ─────────────────────────────────────────────────────────────────────────
    /// Insert blank lines between blocks the renderer would merge
    pub auto_spacing: bool,

    /// Carry list markers onto new lines
    pub list_continuation: bool,

    /// Toggle task checkboxes when the caret lands in the brackets
    pub task_toggle: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Preview
    // ─────────────────────────────────────────────────────────────────────────
    /// Quiet period before the preview re-renders, in milliseconds
    pub preview_debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            margin_v: 2.0,
            margin_h: 2.0,
            show_preview_margins: true,
            default_export_path: None,
            auto_spacing: true,
            list_continuation: true,
            task_toggle: true,
            preview_debounce_ms: 300,
        }
    }
}

impl Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Minimum page margin (cm).
    pub const MIN_MARGIN: f32 = 0.0;
    /// Maximum page margin (cm).
    pub const MAX_MARGIN: f32 = 10.0;
    /// Minimum preview debounce (ms).
    pub const MIN_DEBOUNCE_MS: u64 = 50;
    /// Maximum preview debounce (ms).
    pub const MAX_DEBOUNCE_MS: u64 = 5000;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values.
    pub fn sanitize(&mut self) {
        self.margin_v = sanitize_margin(self.margin_v);
        self.margin_h = sanitize_margin(self.margin_h);

        self.preview_debounce_ms = self
            .preview_debounce_ms
            .clamp(Self::MIN_DEBOUNCE_MS, Self::MAX_DEBOUNCE_MS);

        // An empty path in a hand-edited file means "unset"
        if matches!(&self.default_export_path, Some(p) if p.as_os_str().is_empty()) {
            self.default_export_path = None;
        }
    }

    /// Load settings and sanitize them to ensure validity.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Field names accepted by [`Settings::assign`].
    pub const KEYS: &'static [&'static str] = &[
        "margin_v",
        "margin_h",
        "show_preview_margins",
        "default_export_path",
        "auto_spacing",
        "list_continuation",
        "task_toggle",
        "preview_debounce_ms",
    ];

    /// Apply one `key=value` assignment, e.g. `margin_v=2.5`.
    ///
    /// The value is read as JSON when it parses (`2.5`, `false`, `null`)
    /// and as a plain string otherwise. Out-of-range values are clamped as
    /// on load. On error `self` is left untouched.
    pub fn assign(&mut self, assignment: &str) -> Result<(), Error> {
        let (key, raw) = assignment
            .split_once('=')
            .ok_or_else(|| Error::Application(format!("Expected KEY=VALUE, got '{}'", assignment)))?;
        let key = key.trim();
        let raw = raw.trim();

        if !Self::KEYS.contains(&key) {
            return Err(Error::Application(format!(
                "Unknown setting '{}' (expected one of: {})",
                key,
                Self::KEYS.join(", ")
            )));
        }

        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

        let mut json = serde_json::to_value(&*self)?;
        if let Value::Object(fields) = &mut json {
            fields.insert(key.to_string(), value);
        }

        let mut next: Self = serde_json::from_value(json).map_err(|e| {
            Error::Application(format!("Invalid value '{}' for {}: {}", raw, key, e))
        })?;
        next.sanitize();
        *self = next;
        Ok(())
    }

    /// Preview debounce as a `Duration`.
    pub fn preview_debounce(&self) -> Duration {
        Duration::from_millis(self.preview_debounce_ms)
    }
}

fn sanitize_margin(value: f32) -> f32 {
    if value.is_nan() {
        return Settings::default().margin_v;
    }
    value.clamp(Settings::MIN_MARGIN, Settings::MAX_MARGIN)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
