//! Error types for the extraction and parsing pipeline.
//!
//! Only failures that stop a run live here. Absent metadata, malformed
//! question rows, and numbering gaps are reported as data in the exam
//! summary instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort processing of an input.
#[derive(Debug, Error)]
pub enum Error {
    /// A declared input path does not exist.
    #[error("Input not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// The external text converter is missing or exited with failure.
    #[error("{tool} failed to extract text: {diagnostics}")]
    ExtractionFailure { tool: String, diagnostics: String },

    /// Reading an input or writing an output failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is missing or invalid.
    #[error("{0}")]
    Config(String),
}

impl Error {
    /// Stable name of the error kind, used in `ERROR: <kind>: <details>` lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MissingInput(_) => "MissingInput",
            Error::ExtractionFailure { .. } => "ExtractionFailure",
            Error::Io { .. } => "IoError",
            Error::Config(_) => "ConfigError",
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
