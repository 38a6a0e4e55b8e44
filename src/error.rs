//! Error types for the indexer and the extractor

use std::process::ExitCode;

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, TexIndexError>;

/// Errors that abort an indexing or extraction run
#[derive(Debug, Error)]
pub enum TexIndexError {
    #[error("Target directory already exists: {path}")]
    TargetExists { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Concept table {path}: {message}")]
    ConceptTable { path: String, message: String },

    #[error("Config file {path}: {message}")]
    Config { path: String, message: String },

    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    #[error("Failed to build concept matcher: {message}")]
    Matcher { message: String },

    #[error("LaTeX to text conversion failed: {message}")]
    Converter { message: String },

    #[error("Prompt failed: {message}")]
    Prompt { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TexIndexError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::TargetExists { .. } => ExitCode::from(1),
            Self::FileNotFound { .. } => ExitCode::from(2),
            Self::ConceptTable { .. }
            | Self::Config { .. }
            | Self::InvalidGlob { .. }
            | Self::Matcher { .. } => ExitCode::from(3),
            Self::Converter { .. } | Self::Prompt { .. } => ExitCode::from(4),
            Self::Io(_) => ExitCode::from(5),
        }
    }

    pub(crate) fn concept_table(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::ConceptTable {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<globset::Error> for TexIndexError {
    fn from(err: globset::Error) -> Self {
        Self::InvalidGlob {
            pattern: err.glob().unwrap_or_default().to_string(),
            message: err.kind().to_string(),
        }
    }
}

impl From<ignore::Error> for TexIndexError {
    fn from(err: ignore::Error) -> Self {
        let message = err.to_string();
        let io = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, message));
        Self::Io(io)
    }
}
