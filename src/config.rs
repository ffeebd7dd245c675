//! Loading and saving settings as a TOML file.
//!
//! Real chat clients persist plugin settings themselves; the demo host (and
//! any host without its own settings store) uses this manager instead.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::paths;
use crate::settings::Settings;

/// Manages the settings file at `$XDG_CONFIG_HOME/polyglot/config.toml`.
pub struct SettingsManager {
    config_path: PathBuf,
}

impl SettingsManager {
    pub fn new() -> Self {
        Self {
            config_path: paths::config_dir().join("config.toml"),
        }
    }

    /// Manager against an explicit file path.
    pub fn at_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<Settings> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let settings: Settings =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(settings).context("Failed to serialize settings")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    pub fn load_or_default(&self) -> Settings {
        self.load().unwrap_or_default()
    }
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager_in(temp_dir: &TempDir) -> SettingsManager {
        SettingsManager::at_path(temp_dir.path().join("config.toml"))
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_in(&temp_dir);

        let settings = Settings {
            api_key: "secret".to_string(),
            target_lang: "JA".to_string(),
            preserve_formatting: false,
            auto_translate_incoming: false,
            auto_incoming_target_lang: "EN-US".to_string(),
        };

        manager.save(&settings).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_nonexistent_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_in(&temp_dir);

        assert!(manager.load().is_err());
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_in(&temp_dir);

        let settings = manager.load_or_default();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let manager =
            SettingsManager::at_path(temp_dir.path().join("nested").join("config.toml"));

        manager.save(&Settings::default()).unwrap();
        assert!(manager.config_path().exists());
    }
}
