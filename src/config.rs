//! Pipeline configuration.
//!
//! Parameters live in `~/.ciphermesh/config.toml` unless a path is given.
//! A missing file means defaults: `f(x) = (3x + 7) mod 95`, blocks of 4,
//! strict input.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::ConfigurationError;
use crate::layers::{AffineSubstitution, BlockReversal};
use crate::{DEFAULT_BLOCK_SIZE, DEFAULT_INCREMENT, DEFAULT_MULTIPLIER};

/// Errors that can occur when loading or saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config directory not found. Unable to determine home directory.")]
    NoConfigDir,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigurationError),
}

/// What the pipeline does with characters outside the printable alphabet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Reject the whole input with a domain error. Round-trip always holds.
    #[default]
    Strict,
    /// Fold offending characters into range by `(codepoint - 32) mod 95`.
    /// Never fails, but distinct inputs may collide.
    Fold,
}

impl fmt::Display for InputPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputPolicy::Strict => f.write_str("strict"),
            InputPolicy::Fold => f.write_str("fold"),
        }
    }
}

impl FromStr for InputPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(InputPolicy::Strict),
            "fold" => Ok(InputPolicy::Fold),
            other => Err(format!("unknown input policy '{other}' (expected strict or fold)")),
        }
    }
}

/// Parameters for building a [`CipherMesh`](crate::CipherMesh).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MeshConfig {
    /// Affine multiplier `a`; must be coprime to 95.
    pub multiplier: i64,

    /// Affine increment `b`.
    pub increment: i64,

    /// Characters per reversed block; at least 1.
    pub block_size: usize,

    /// Handling of non-printable input.
    pub input_policy: InputPolicy,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_MULTIPLIER,
            increment: DEFAULT_INCREMENT,
            block_size: DEFAULT_BLOCK_SIZE,
            input_policy: InputPolicy::default(),
        }
    }
}

impl MeshConfig {
    /// Load configuration from the default location.
    ///
    /// Returns defaults if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, returning defaults if it is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: MeshConfig = toml::from_str(&content)?;
        config.validate()?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Checks that the parameters can build a working pipeline.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        AffineSubstitution::new(self.multiplier, self.increment)?;
        BlockReversal::new(self.block_size)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(get_config_dir()?.join("config.toml"))
    }
}

/// Get the CipherMesh config directory (`~/.ciphermesh`).
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".ciphermesh"))
        .ok_or(ConfigError::NoConfigDir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = MeshConfig::default();
        assert_eq!(config.multiplier, 3);
        assert_eq!(config.increment, 7);
        assert_eq!(config.block_size, 4);
        assert_eq!(config.input_policy, InputPolicy::Strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_serialization() {
        let config = MeshConfig {
            multiplier: 7,
            increment: 11,
            block_size: 5,
            input_policy: InputPolicy::Fold,
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("multiplier = 7"));
        assert!(toml_str.contains("input_policy = \"fold\""));

        let loaded: MeshConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let loaded: MeshConfig = toml::from_str("block_size = 6\n").unwrap();
        assert_eq!(loaded.block_size, 6);
        assert_eq!(loaded.multiplier, DEFAULT_MULTIPLIER);
        assert_eq!(loaded.input_policy, InputPolicy::Strict);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = MeshConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, MeshConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = MeshConfig {
            multiplier: 2,
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(MeshConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_rejects_invalid_multiplier() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "multiplier = 5\n").unwrap();

        let result = MeshConfig::load_from(&path);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid(
                ConfigurationError::NonInvertibleMultiplier { a: 5, m: 95 }
            ))
        ));
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "multiplier = \"three\"\n").unwrap();

        assert!(matches!(
            MeshConfig::load_from(&path),
            Err(ConfigError::TomlParseError(_))
        ));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("strict".parse::<InputPolicy>(), Ok(InputPolicy::Strict));
        assert_eq!("FOLD".parse::<InputPolicy>(), Ok(InputPolicy::Fold));
        assert!("lenient".parse::<InputPolicy>().is_err());
    }
}
