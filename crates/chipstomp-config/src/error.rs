//! Error types for preset operations.

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur while loading, saving or applying presets.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// No preset file or factory preset by that name
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// Unknown effect id
    #[error("unknown effect type: {0}")]
    UnknownEffect(String),

    /// A feature assignment that could not be understood
    #[error("invalid feature '{feature}' for effect '{effect}': {reason}")]
    InvalidFeature {
        /// Id of the effect owning the feature.
        effect: String,
        /// Key of the feature.
        feature: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The preset names an effect the target lineup does not carry
    #[error("effect '{0}' is not in the pedal lineup")]
    NotInLineup(String),

    /// The preset failed validation
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}
