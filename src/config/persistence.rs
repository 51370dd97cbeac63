//! Settings file persistence
//!
//! Loads and saves `settings.json` in the platform config directory. Loading
//! never fails: a missing, empty or corrupt file yields defaults.

use crate::config::Settings;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "papersmith";

/// Configuration file name
const CONFIG_FILE_NAME: &str = "settings.json";

/// Extension of the temporary file used during atomic writes
const BACKUP_EXTENSION: &str = "json.bak";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the application.
///
/// - **Windows**: `%APPDATA%\papersmith\`
/// - **macOS**: `~/Library/Application Support/papersmith/`
/// - **Linux**: `~/.config/papersmith/`
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the config directory cannot be determined
/// (e.g., if the HOME environment variable is not set).
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the settings file.
pub fn get_config_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

// ─────────────────────────────────────────────────────────────────────────────
// Load Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Load settings from the default location, falling back to defaults.
pub fn load_config() -> Settings {
    get_config_file_path()
        .and_then(|path| load_config_from(&path))
        .unwrap_or_warn_default(Settings::default(), "Failed to load configuration")
}

/// Load settings from `path`.
///
/// A missing or empty file gives defaults. Invalid JSON is an error so the
/// caller can decide whether to fall back.
pub fn load_config_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Settings::default());
    }

    debug!("Loading config from: {}", path.display());

    let contents = fs::read_to_string(path).map_err(|e| Error::ConfigLoad {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    if contents.trim().is_empty() {
        debug!("Config file is empty, using defaults");
        return Ok(Settings::default());
    }

    let settings = Settings::from_json_sanitized(&contents).map_err(|e| {
        warn!("Config file at {} contains invalid JSON: {}", path.display(), e);
        Error::ConfigParse {
            message: format!("Failed to parse config file: {}", e),
            source: Some(Box::new(e)),
        }
    })?;

    info!("Configuration loaded from {}", path.display());
    Ok(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Save Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Save settings to the default location.
pub fn save_config(settings: &Settings) -> Result<()> {
    save_config_to(&get_config_file_path()?, settings)
}

/// Save settings to `path`, creating the parent directory if needed.
///
/// The JSON goes to a sibling `.json.bak` file first and is then renamed
/// over the target, so a crash never leaves a half-written settings file.
pub fn save_config_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            debug!("Creating config directory: {}", dir.display());
            fs::create_dir_all(dir).map_err(|e| Error::ConfigSave {
                path: dir.to_path_buf(),
                source: Box::new(e),
            })?;
        }
    }

    let json = serde_json::to_string_pretty(settings).map_err(|e| Error::ConfigSave {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let backup_path = path.with_extension(BACKUP_EXTENSION);
    fs::write(&backup_path, &json).map_err(|e| Error::ConfigSave {
        path: backup_path.clone(),
        source: Box::new(e),
    })?;

    fs::rename(&backup_path, path).map_err(|e| Error::ConfigSave {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    info!("Configuration saved to {}", path.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Update Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Apply `key=value` assignments to the settings file at the default location.
pub fn update_config(assignments: &[String]) -> Result<Settings> {
    update_config_at(&get_config_file_path()?, assignments)
}

/// Apply `key=value` assignments to the settings file at `path` and save it.
///
/// All assignments are applied before anything is written; one bad
/// assignment leaves the file as it was. A corrupt file is replaced, starting
/// from defaults.
pub fn update_config_at(path: &Path, assignments: &[String]) -> Result<Settings> {
    let mut settings = load_config_from(path)
        .unwrap_or_warn_default(Settings::default(), "Replacing unreadable configuration");

    for assignment in assignments {
        settings.assign(assignment)?;
    }

    save_config_to(path, &settings)?;
    Ok(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Temporary config directory with the real file layout.
    struct TestEnv {
        _temp_dir: TempDir,
        config_file: PathBuf,
    }

    impl TestEnv {
        fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let config_file = temp_dir.path().join(APP_NAME).join(CONFIG_FILE_NAME);
            Self {
                _temp_dir: temp_dir,
                config_file,
            }
        }

        fn write_config(&self, content: &str) {
            if let Some(dir) = self.config_file.parent() {
                fs::create_dir_all(dir).expect("Failed to create config dir");
            }
            fs::write(&self.config_file, content).expect("Failed to write config");
        }
    }

    #[test]
    fn test_get_config_file_path() {
        if let Ok(path) = get_config_file_path() {
            assert!(path.ends_with(Path::new(APP_NAME).join(CONFIG_FILE_NAME)));
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Load
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_missing_file_gives_defaults() {
        let env = TestEnv::new();
        let settings = load_config_from(&env.config_file).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let env = TestEnv::new();
        env.write_config("   \n");
        assert_eq!(load_config_from(&env.config_file).unwrap(), Settings::default());
    }

    #[test]
    fn test_load_sanitizes_values() {
        let env = TestEnv::new();
        env.write_config(r#"{"margin_v": 25.0, "preview_debounce_ms": 0}"#);

        let settings = load_config_from(&env.config_file).unwrap();
        assert_eq!(settings.margin_v, Settings::MAX_MARGIN);
        assert_eq!(settings.preview_debounce_ms, Settings::MIN_DEBOUNCE_MS);
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let env = TestEnv::new();
        env.write_config("{ invalid json }");

        let err = load_config_from(&env.config_file).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_wrong_types_are_parse_error() {
        let env = TestEnv::new();
        env.write_config(r#"{"margin_h": "wide"}"#);
        assert!(load_config_from(&env.config_file).is_err());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Save
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_save_creates_directory_and_roundtrips() {
        let env = TestEnv::new();
        let original = Settings {
            margin_v: 1.25,
            show_preview_margins: false,
            list_continuation: false,
            preview_debounce_ms: 500,
            ..Settings::default()
        };

        save_config_to(&env.config_file, &original).unwrap();
        let loaded = load_config_from(&env.config_file).unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_save_leaves_no_backup_file() {
        let env = TestEnv::new();
        save_config_to(&env.config_file, &Settings::default()).unwrap();

        assert!(env.config_file.exists());
        assert!(!env.config_file.with_extension(BACKUP_EXTENSION).exists());
    }

    #[test]
    fn test_save_overwrites_existing() {
        let env = TestEnv::new();
        env.write_config(r#"{"margin_h": 9.0}"#);

        save_config_to(&env.config_file, &Settings::default()).unwrap();
        let loaded = load_config_from(&env.config_file).unwrap();
        assert_eq!(loaded.margin_h, 2.0);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Update
    // ─────────────────────────────────────────────────────────────────────────

    fn assignments(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_update_writes_file() {
        let env = TestEnv::new();
        let updated =
            update_config_at(&env.config_file, &assignments(&["margin_v=2.5", "task_toggle=false"]))
                .unwrap();

        assert_eq!(updated.margin_v, 2.5);
        assert!(!updated.task_toggle);
        assert_eq!(load_config_from(&env.config_file).unwrap(), updated);
    }

    #[test]
    fn test_update_keeps_other_values() {
        let env = TestEnv::new();
        env.write_config(r#"{"margin_h": 4.0, "auto_spacing": false}"#);

        let updated = update_config_at(&env.config_file, &assignments(&["margin_v=1"])).unwrap();
        assert_eq!(updated.margin_h, 4.0);
        assert!(!updated.auto_spacing);
        assert_eq!(updated.margin_v, 1.0);
    }

    #[test]
    fn test_update_with_bad_assignment_leaves_file() {
        let env = TestEnv::new();
        env.write_config(r#"{"margin_h": 4.0}"#);

        let result = update_config_at(&env.config_file, &assignments(&["margin_v=3", "bogus=1"]));
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&env.config_file).unwrap(), r#"{"margin_h": 4.0}"#);
    }

    #[test]
    fn test_update_replaces_corrupt_file() {
        let env = TestEnv::new();
        env.write_config("{ invalid json }");

        let updated = update_config_at(&env.config_file, &assignments(&["margin_v=3"])).unwrap();
        assert_eq!(updated.margin_v, 3.0);
        assert_eq!(load_config_from(&env.config_file).unwrap(), updated);
    }
}
