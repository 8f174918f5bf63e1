//! User configuration: confirmation literal, input time zone, outbox location.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::form::{DEFAULT_CONFIRMATION_TEXT, ModalSettings};

/// Errors that can occur while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for [`Config`].
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `utc_offset_minutes` lies outside ±24 hours.
    #[error("UTC offset out of range: {0} minutes")]
    InvalidOffset(i32),

    /// `confirmation_text` is empty, which would make confirmation meaningless.
    #[error("confirmation text cannot be empty")]
    EmptyConfirmationText,
}

/// Contents of `config.json`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Literal that must be typed to confirm a lease update.
    pub confirmation_text: String,
    /// Offset east of UTC that date/time inputs are read in.
    pub utc_offset_minutes: i32,
    /// Directory for committed payloads; the XDG data directory when unset.
    pub outbox_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            confirmation_text: DEFAULT_CONFIRMATION_TEXT.to_string(),
            utc_offset_minutes: 0,
            outbox_dir: None,
        }
    }
}

impl Config {
    /// Default location: `~/.config/leasegate/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("leasegate").join("config.json"))
    }

    /// Loads the config at `path`, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.check()?;
        Ok(config)
    }

    /// Loads the config from `path`, or from [`default_path`](Self::default_path).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("no config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// The configured offset as a chrono [`FixedOffset`].
    pub fn offset(&self) -> Result<FixedOffset, ConfigError> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(ConfigError::InvalidOffset(self.utc_offset_minutes))
    }

    /// Settings for the edit modal.
    pub fn modal_settings(&self) -> Result<ModalSettings, ConfigError> {
        self.check()?;
        Ok(ModalSettings {
            confirmation_text: self.confirmation_text.clone(),
            offset: self.offset()?,
        })
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.confirmation_text.is_empty() {
            return Err(ConfigError::EmptyConfirmationText);
        }
        self.offset().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn write_config(body: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, body).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.confirmation_text, "update");
    }

    #[test]
    fn explicit_path_is_used() {
        let (_dir, path) = write_config(r#"{"confirmation_text": "expire"}"#);
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.confirmation_text, "expire");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let (_dir, path) = write_config(r#"{"utc_offset_minutes": 120}"#);
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.confirmation_text, "update");
        assert_eq!(config.utc_offset_minutes, 120);
        assert_eq!(config.outbox_dir, None);
    }

    #[test]
    fn outbox_dir_is_read() {
        let (_dir, path) = write_config(r#"{"outbox_dir": "/tmp/leasegate-outbox"}"#);
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.outbox_dir, Some(PathBuf::from("/tmp/leasegate-outbox")));
    }

    #[test]
    fn invalid_json_is_error() {
        let (_dir, path) = write_config("{");
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Json(_))));
    }

    #[test]
    fn empty_confirmation_text_is_error() {
        let (_dir, path) = write_config(r#"{"confirmation_text": ""}"#);
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::EmptyConfirmationText)
        ));
    }

    #[test]
    fn out_of_range_offset_is_error() {
        let (_dir, path) = write_config(r#"{"utc_offset_minutes": 1440}"#);
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::InvalidOffset(1440))
        ));
    }

    #[test]
    fn offset_converts_minutes() {
        let config = Config {
            utc_offset_minutes: -300,
            ..Config::default()
        };
        assert_eq!(
            config.offset().unwrap(),
            FixedOffset::west_opt(5 * 3600).unwrap()
        );
    }

    #[test]
    fn huge_offset_does_not_overflow() {
        let config = Config {
            utc_offset_minutes: i32::MAX,
            ..Config::default()
        };
        assert!(matches!(config.offset(), Err(ConfigError::InvalidOffset(_))));
    }

    #[test]
    fn modal_settings_carry_config() {
        let config = Config {
            confirmation_text: "expire".into(),
            utc_offset_minutes: 60,
            outbox_dir: None,
        };
        let settings = config.modal_settings().unwrap();
        assert_eq!(settings.confirmation_text, "expire");
        assert_eq!(settings.offset, FixedOffset::east_opt(3600).unwrap());
    }

    #[test]
    fn default_settings_match_modal_default() {
        assert_eq!(
            Config::default().modal_settings().unwrap(),
            ModalSettings::default()
        );
    }
}
