//! Error types for encounter loading and configuration

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading an encounter session.
///
/// Every variant is fatal to session start. Once a session is loaded,
/// navigation and timer operations cannot fail.
#[derive(Debug, Error)]
pub enum EncounterError {
    #[error("could not find an encounter file in {dir}")]
    NoEncounterFound { dir: PathBuf },

    #[error("malformed record on row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    #[error("failed to read directory {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}")]
    ReadTabular {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write {path}")]
    WriteTabular {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid value '{value}' for config key '{key}'")]
    InvalidValue { key: String, value: String },

    #[error("failed to load configuration")]
    Load(#[from] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),
}
