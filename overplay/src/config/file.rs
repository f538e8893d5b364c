//! INI persistence.

use std::fs;
use std::path::{Path, PathBuf};

use ini::Ini;

use super::error::ConfigError;
use super::keys::ConfigKey;
use super::OverplayConfig;

/// File name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// `<platform config dir>/overplay`, or `./.overplay` when the platform
/// has no config directory.
pub fn config_directory() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("overplay"))
        .unwrap_or_else(|| PathBuf::from(".overplay"))
}

/// Default location of the config file.
pub fn config_file_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

impl OverplayConfig {
    /// Parse INI text. Missing sections and keys keep their defaults.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let mut config = OverplayConfig::default();
        for key in ConfigKey::all() {
            let value = ini
                .section(Some(key.section()))
                .and_then(|section| section.get(key.key_name()));
            if let Some(value) = value {
                key.set(&mut config, value)?;
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Render every key as INI.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            ini.with_section(Some(key.section()))
                .set(key.key_name(), key.get(self));
        }
        ini
    }

    /// Load from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini_str(&text)
    }

    /// Load from `path`, or defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_error = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_error)?;
            }
        }
        self.to_ini().write_to_file(path).map_err(write_error)
    }
}
