use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

pub const THEME_DARK: &str = "dark";
pub const THEME_LIGHT: &str = "light";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// "dark" or "light"; unset means follow the terminal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
    /// Where this config was loaded from and is saved back to
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_help")]
    pub help: String,
    #[serde(default = "default_new_task")]
    pub new_task: String,
    #[serde(default = "default_edit")]
    pub edit: String,
    #[serde(default = "default_delete")]
    pub delete: String,
    #[serde(default = "default_complete")]
    pub complete: String,
    #[serde(default = "default_toggle_theme")]
    pub toggle_theme: String,
    #[serde(default = "default_logout")]
    pub logout: String,
    #[serde(default = "default_prev_month")]
    pub prev_month: String,
    #[serde(default = "default_next_month")]
    pub next_month: String,
    #[serde(default = "default_today")]
    pub today: String,
    #[serde(default = "default_save")]
    pub save: String,
}

/// Colors used by the widgets, as color strings understood by `parse_color`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub fg: String,
    pub bg: String,
    pub muted: String,
    pub highlight_bg: String,
    pub highlight_fg: String,
    pub own_task: String,
    pub family_task: String,
    pub completed: String,
    pub today: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: None,
            log_level: default_log_level(),
            key_bindings: KeyBindings::default(),
            config_version: Some(CURRENT_CONFIG_VERSION),
            path: None,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            help: default_help(),
            new_task: default_new_task(),
            edit: default_edit(),
            delete: default_delete(),
            complete: default_complete(),
            toggle_theme: default_toggle_theme(),
            logout: default_logout(),
            prev_month: default_prev_month(),
            next_month: default_next_month(),
            today: default_today(),
            save: default_save(),
        }
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            fg: "white".to_string(),
            bg: "#111827".to_string(),
            muted: "gray".to_string(),
            highlight_bg: "#1e3a8a".to_string(),
            highlight_fg: "white".to_string(),
            own_task: "lightblue".to_string(),
            family_task: "lightmagenta".to_string(),
            completed: "lightgreen".to_string(),
            today: "lightcyan".to_string(),
        }
    }

    pub fn light() -> Self {
        Self {
            fg: "black".to_string(),
            bg: "white".to_string(),
            muted: "darkgray".to_string(),
            highlight_bg: "#dbeafe".to_string(),
            highlight_fg: "black".to_string(),
            own_task: "blue".to_string(),
            family_task: "magenta".to_string(),
            completed: "green".to_string(),
            today: "#2563eb".to_string(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_quit() -> String {
    "q".to_string()
}

fn default_help() -> String {
    "F1".to_string()
}

fn default_new_task() -> String {
    "n".to_string()
}

fn default_edit() -> String {
    "e".to_string()
}

fn default_delete() -> String {
    "d".to_string()
}

fn default_complete() -> String {
    "Space".to_string()
}

fn default_toggle_theme() -> String {
    "t".to_string()
}

fn default_logout() -> String {
    "L".to_string()
}

fn default_prev_month() -> String {
    "[".to_string()
}

fn default_next_month() -> String {
    "]".to_string()
}

fn default_today() -> String {
    "g".to_string()
}

fn default_save() -> String {
    "Ctrl+s".to_string()
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
}

impl Config {
    /// Load the profile's config file, creating it with defaults if missing
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, creating it with defaults if missing
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .map_err(|e| ConfigError::ReadError(e.to_string()))?;
            let mut config: Config = toml::from_str(&contents)?;
            if let Some(ref theme) = config.theme {
                if theme != THEME_DARK && theme != THEME_LIGHT {
                    return Err(ConfigError::UnknownTheme(theme.clone()));
                }
            }
            config.path = Some(path.to_path_buf());
            Ok(config)
        } else {
            let mut config = Config {
                path: Some(path.to_path_buf()),
                ..Config::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    /// Write the config back to where it was loaded from; a config without
    /// a path (tests, `Config::default()`) is kept in memory only
    pub fn save(&mut self) -> Result<(), ConfigError> {
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        let Some(config_path) = self.path.clone() else {
            return Ok(());
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, toml_string)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile)
            .ok_or_else(|| ConfigError::ConfigDirError("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("config.toml"))
    }

    /// Resolve the theme flag: the stored preference, else the terminal's hint
    pub fn is_dark(&self) -> bool {
        match self.theme.as_deref() {
            Some(THEME_DARK) => true,
            Some(THEME_LIGHT) => false,
            _ => terminal_prefers_dark(std::env::var("COLORFGBG").ok().as_deref()),
        }
    }

    /// Record the theme preference and persist it immediately
    pub fn set_dark(&mut self, dark: bool) -> Result<(), ConfigError> {
        self.theme = Some(if dark { THEME_DARK } else { THEME_LIGHT }.to_string());
        self.save()
    }
}

/// Interpret a `COLORFGBG` value ("fg;bg", sometimes "fg;default;bg").
/// Background indices 7 and 9-15 are light; anything else, or no hint, is dark.
pub fn terminal_prefers_dark(colorfgbg: Option<&str>) -> bool {
    let Some(bg) = colorfgbg.and_then(|v| v.rsplit(';').next()).and_then(|b| b.trim().parse::<u8>().ok()) else {
        return true;
    };
    !(bg == 7 || (9..=15).contains(&bg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorfgbg_hint() {
        assert!(terminal_prefers_dark(None));
        assert!(terminal_prefers_dark(Some("15;0")));
        assert!(!terminal_prefers_dark(Some("0;15")));
        assert!(!terminal_prefers_dark(Some("0;default;7")));
        assert!(terminal_prefers_dark(Some("garbage")));
    }

    #[test]
    fn explicit_theme_wins_over_hint() {
        let mut config = Config::default();
        config.theme = Some("light".to_string());
        assert!(!config.is_dark());
        config.theme = Some("dark".to_string());
        assert!(config.is_dark());
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.theme, None);
        assert_eq!(config.key_bindings.quit, "q");
    }

    #[test]
    fn toggled_theme_is_written_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::load_from(&path).unwrap();
        config.set_dark(false).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("theme = \"light\""));
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.theme.as_deref(), Some("light"));
        assert!(!reloaded.is_dark());
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "theme = \"sepia\"\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::UnknownTheme(_))));
    }

    #[test]
    fn partial_key_bindings_keep_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[key_bindings]\nquit = \"x\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.key_bindings.quit, "x");
        assert_eq!(config.key_bindings.new_task, "n");
    }
}
