//! Error types for the logic simulator front end.
//!
//! Malformed definition files never produce a [`LogsimError`]: the parser
//! reports those as [`Diagnostic`](crate::dsl::Diagnostic)s and keeps going.
//! This type covers the environment around a parse, such as unreadable files.

use thiserror::Error;

/// Result type alias using [`LogsimError`].
pub type Result<T> = std::result::Result<T, LogsimError>;

/// Unified error type for all Logsim operations.
#[derive(Error, Debug)]
pub enum LogsimError {
    // ============ I/O Errors ============
    /// Error reading a definition file
    #[error("Failed to read definition file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing diagnostics to the output sink
    #[error("Failed to write diagnostics: {source}")]
    DiagnosticOutput {
        #[source]
        source: std::io::Error,
    },
}

impl LogsimError {
    /// Create a file read error
    pub fn file_read(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::FileReadError {
            path: path.display().to_string(),
            source,
        }
    }
}
