//! Error types for the two places the game touches the filesystem: the
//! optional TOML config and the high-score file.
//!
//! Steady-state play has no recoverable errors; everything here happens at
//! startup or when the leaderboard is written.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure to load or validate a [`crate::config::GameConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io { path: PathBuf, source: io::Error },

    /// The file is not valid TOML or has a value of the wrong type.
    Parse { path: PathBuf, source: toml::de::Error },

    /// A value parsed fine but makes no sense for the game.
    OutOfRange {
        /// Config key (for logging).
        name: &'static str,
        /// Human-readable description of what is accepted.
        expected: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read config '{}': {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid config '{}': {}", path.display(), source)
            }
            ConfigError::OutOfRange { name, expected } => {
                write!(f, "config value '{}' must be {}", name, expected)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::OutOfRange { .. } => None,
        }
    }
}

/// Failure to read or write the high-score file.
///
/// Malformed lines are not errors: they are skipped while parsing.
#[derive(Debug)]
pub enum HighScoreError {
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for HighScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighScoreError::Io { path, source } => {
                write!(f, "high-score file '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for HighScoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HighScoreError::Io { source, .. } => Some(source),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
pub type HighScoreResult<T> = Result<T, HighScoreError>;
