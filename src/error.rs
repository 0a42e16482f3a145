use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a run before any file is touched.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid radius format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported unit: {0}")]
    UnsupportedUnit(String),

    #[error("Input folder {0:?} does not exist")]
    MissingInput(PathBuf),
}
