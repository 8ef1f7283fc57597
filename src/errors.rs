// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReqwatchError {
    /// A change check was requested for a path that is empty or not a file.
    #[error("Requirements file {0:?} doesn't exist")]
    MissingRequirementsFile(PathBuf),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ReqwatchError>;
