use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

use crate::error::{IdeaError, Result};

/// Directory holding a board's data and config.
pub const BOARD_DIR: &str = ".ideaboard";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Characters of description shown in listings.
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,
    /// `chrono` format for due dates. Date specifiers only.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// `chrono` format for comment timestamps (UTC).
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            snippet_chars: default_snippet_chars(),
            date_format: default_date_format(),
            time_format: default_time_format(),
        }
    }
}

impl DisplayConfig {
    /// Check both formats against a sample value. chrono only reports a
    /// bad specifier (or `%H` on a date) when the value is rendered.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let sample_date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap_or_default();
        if try_format(sample_date.format(&self.date_format)).is_err() {
            return Err(format!(
                "display.date_format {:?} is not a valid date format",
                self.date_format
            ));
        }
        let sample_time = Utc.timestamp_opt(0, 0).single().unwrap_or_default();
        if try_format(sample_time.format(&self.time_format)).is_err() {
            return Err(format!(
                "display.time_format {:?} is not a valid timestamp format",
                self.time_format
            ));
        }
        Ok(())
    }

    /// Render a due date, falling back to ISO form if the format fails.
    #[must_use]
    pub fn format_date(&self, date: NaiveDate) -> String {
        try_format(date.format(&self.date_format))
            .unwrap_or_else(|_| date.format("%Y-%m-%d").to_string())
    }

    /// Render a comment timestamp, falling back to RFC 3339.
    #[must_use]
    pub fn format_time(&self, ts: DateTime<Utc>) -> String {
        try_format(ts.format(&self.time_format)).unwrap_or_else(|_| ts.to_rfc3339())
    }
}

fn try_format(value: impl fmt::Display) -> std::result::Result<String, fmt::Error> {
    let mut out = String::new();
    write!(out, "{value}")?;
    Ok(out)
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

/// Walk up from `start` to the nearest directory containing [`BOARD_DIR`].
#[must_use]
pub fn find_board_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(BOARD_DIR).is_dir() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Directory the key-value store writes into.
#[must_use]
pub fn store_dir(board_root: &Path) -> PathBuf {
    board_root.join(BOARD_DIR).join("store")
}

pub fn load_project_config(board_root: &Path) -> Result<ProjectConfig> {
    let path = board_root.join(BOARD_DIR).join("config.toml");
    let config: ProjectConfig = load_toml(&path)?;
    config.display.validate().map_err(|message| IdeaError::Config {
        path: path.display().to_string(),
        message,
    })?;
    Ok(config)
}

pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };
    load_toml(&config_dir.join("ideaboard/config.toml"))
}

fn load_toml<T: Default + for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let content = std::fs::read_to_string(path)?;
    toml::from_str::<T>(&content).map_err(|e| IdeaError::Config {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// `--json` > `FORMAT` env > user config > pretty on a TTY, text when piped.
#[must_use]
pub fn resolve_output(
    cli_json: bool,
    user_output: Option<&str>,
    env_format: Option<&str>,
    is_tty: bool,
) -> String {
    fn normalize_output_mode(raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" | "human" => Some("pretty"),
            "text" | "table" => Some("text"),
            "json" => Some("json"),
            _ => None,
        }
    }

    if cli_json {
        return "json".to_string();
    }
    if let Some(mode) = env_format.and_then(normalize_output_mode) {
        return mode.to_string();
    }
    if let Some(mode) = user_output.and_then(normalize_output_mode) {
        return mode.to_string();
    }
    let fallback = if is_tty { "pretty" } else { "text" };
    fallback.to_string()
}

const fn default_snippet_chars() -> usize {
    100
}

fn default_date_format() -> String {
    "%b %-d, %Y".to_string()
}

fn default_time_format() -> String {
    "%b %-d, %Y %H:%M".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_project_config_uses_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert_eq!(cfg.display.snippet_chars, 100);
        assert_eq!(cfg.display.date_format, "%b %-d, %Y");
    }

    #[test]
    fn partial_project_config_fills_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(root.path().join(BOARD_DIR)).expect("mkdir");
        std::fs::write(
            root.path().join(BOARD_DIR).join("config.toml"),
            "[display]\nsnippet_chars = 40\n",
        )
        .expect("write config");
        let cfg = load_project_config(root.path()).expect("load");
        assert_eq!(cfg.display.snippet_chars, 40);
        assert_eq!(cfg.display.date_format, "%b %-d, %Y");
    }

    #[test]
    fn broken_project_config_is_a_config_error() {
        let root = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(root.path().join(BOARD_DIR)).expect("mkdir");
        std::fs::write(root.path().join(BOARD_DIR).join("config.toml"), "[display")
            .expect("write config");
        assert!(matches!(
            load_project_config(root.path()),
            Err(IdeaError::Config { .. })
        ));
    }

    #[test]
    fn time_specifiers_in_date_format_are_a_config_error() {
        let root = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(root.path().join(BOARD_DIR)).expect("mkdir");
        let path = root.path().join(BOARD_DIR).join("config.toml");

        std::fs::write(&path, "[display]\ndate_format = \"%Y-%m-%d %H:%M\"\n").expect("write");
        let err = load_project_config(root.path()).expect_err("time on a date");
        assert!(err.to_string().contains("date_format"));

        std::fs::write(&path, "[display]\ntime_format = \"%Y %Q\"\n").expect("write");
        assert!(matches!(
            load_project_config(root.path()),
            Err(IdeaError::Config { .. })
        ));

        std::fs::write(&path, "[display]\ntime_format = \"%Y-%m-%d %H:%M\"\n").expect("write");
        assert!(load_project_config(root.path()).is_ok());
    }

    #[test]
    fn formatting_never_panics_on_a_bad_format() {
        let display = DisplayConfig {
            date_format: "%H:%M".to_string(),
            time_format: "%Q".to_string(),
            ..DisplayConfig::default()
        };
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).expect("date");
        assert_eq!(display.format_date(date), "2025-03-09");
        let ts = Utc.with_ymd_and_hms(2025, 3, 9, 14, 30, 0).unwrap();
        assert_eq!(display.format_time(ts), "2025-03-09T14:30:00+00:00");
        assert_eq!(DisplayConfig::default().format_time(ts), "Mar 9, 2025 14:30");
    }

    #[test]
    fn cli_json_overrides_env_and_config() {
        assert_eq!(resolve_output(true, Some("pretty"), Some("text"), true), "json");
    }

    #[test]
    fn env_beats_user_config_and_aliases_normalize() {
        assert_eq!(resolve_output(false, Some("json"), Some("human"), false), "pretty");
        assert_eq!(resolve_output(false, Some("table"), None, true), "text");
        assert_eq!(resolve_output(false, None, Some("bogus"), false), "text");
        assert_eq!(resolve_output(false, None, None, true), "pretty");
    }

    #[test]
    fn board_root_is_found_from_subdirectory() {
        let root = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(root.path().join(BOARD_DIR)).expect("mkdir");
        let nested = root.path().join("a/b");
        std::fs::create_dir_all(&nested).expect("mkdir nested");
        assert_eq!(find_board_root(&nested).as_deref(), Some(root.path()));
    }
}
