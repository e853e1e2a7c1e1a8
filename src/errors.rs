//! Error types for the lifelog application.
//!
//! The journal core never lets these escape its public operations: the
//! persistence gateway logs them and degrades to `false`, empty or absent
//! values. They surface only from the raw key-value stores, configuration
//! loading and the command-line form layer.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the lifelog application.
#[derive(Error, Debug)]
pub enum LifeLogError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    /// for mutex lock acquisition issues
    #[error("{message}")]
    LockAcquisitionFailed { message: String },

    /// A date argument that is not in `YYYY-MM-DD` form.
    #[error("Invalid date: {value} (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    /// The journal reported a failed save.
    #[error("Your {record} could not be saved. Please try again.")]
    SaveFailed { record: String },

    /// Input rejected before a journal record was built.
    #[error("Invalid input: {message}")]
    Validation { message: String },
}
