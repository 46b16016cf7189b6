//! Error type shared by the analyzer and the CLI.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Errors produced while scanning a project or writing its reports.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Project root (or another required directory) is missing or not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    /// Filesystem failure with the path that triggered it.
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Script source could not be parsed far enough to list its fields.
    #[error("cannot parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

impl AnalyzerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalyzerError::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code the CLI reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AnalyzerError::NotADirectory(_) => 2,
            AnalyzerError::Io { .. } | AnalyzerError::Parse { .. } => 1,
        }
    }
}
