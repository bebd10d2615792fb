use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::Config;

/// Why a configuration could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML that did not come from a file on disk.
    #[error("Invalid config: {0}")]
    Syntax(#[source] toml::de::Error),

    #[error("Invalid config in {}: {source}", .path.display())]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Bad config value: {0}")]
    BadValue(String),
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/calcpad/config.toml` on Linux, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory if no config directory is known.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("calcpad").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// A missing file yields `Config::default()`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::parse(&content).map_err(|e| match e {
            ConfigError::Syntax(source) => ConfigError::InvalidFile {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        debug!(path = %path.display(), ?config, "Loaded config");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Syntax)?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.error_message.trim().is_empty() {
            return Err(ConfigError::BadValue(
                "error_message must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::SymbolStyle;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "style = \"classic\"").unwrap();
        writeln!(file, "error_message = \"Error\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.style, SymbolStyle::Classic);
        assert_eq!(config.error_message, "Error");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("style = \"math\"").unwrap();
        assert_eq!(config.style, SymbolStyle::Math);
        assert_eq!(config.error_message, "Oops...");
    }

    #[test]
    fn test_invalid_file_carries_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "style = \"gothic\"").unwrap();

        match Config::load_from(file.path()) {
            Err(ConfigError::InvalidFile { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected invalid file error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_without_file_has_no_path() {
        let err = Config::parse("theme = \"dark\"").unwrap_err();
        assert!(matches!(err, ConfigError::Syntax(_)));

        let message = err.to_string();
        assert!(message.starts_with("Invalid config: "), "{}", message);
        assert!(!message.contains("''"), "{}", message);
    }

    #[test]
    fn test_empty_error_message_rejected() {
        assert!(matches!(
            Config::parse("error_message = \"  \""),
            Err(ConfigError::BadValue(_))
        ));
    }
}
