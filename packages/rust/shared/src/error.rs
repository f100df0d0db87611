//! Error types for chempack.
//!
//! Library crates use [`ChempackError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Row-level validation failures are deliberately *not* part of this type:
//! a malformed spreadsheet row is skipped and counted, never raised.

use std::path::PathBuf;

/// Top-level error type for all chempack operations.
#[derive(Debug, thiserror::Error)]
pub enum ChempackError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// A required input is absent: workbook, worksheet, header column,
    /// script module, shell document, or dataset file.
    #[error("missing source: {what} at {path:?}")]
    MissingSource { what: String, path: PathBuf },

    /// An expected markup pattern was not found during shell rewriting,
    /// or the rewritten document failed postcondition verification.
    #[error("markup pattern not found: {message}")]
    Pattern { message: String },

    /// A dataset could not be serialized.
    #[error("encoding error: {message}")]
    Encoding { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ChempackError>;

impl ChempackError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a missing-source error naming the absent input and its path.
    pub fn missing_source(what: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MissingSource {
            what: what.into(),
            path: path.into(),
        }
    }

    /// Create a pattern-not-found error from any displayable message.
    pub fn pattern(msg: impl Into<String>) -> Self {
        Self::Pattern {
            message: msg.into(),
        }
    }

    /// Create an encoding error from any displayable message.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = ChempackError::config("chempack.toml is not valid TOML");
        assert_eq!(err.to_string(), "config error: chempack.toml is not valid TOML");

        let err = ChempackError::missing_source("worksheet 'SI_prefixes'", "units_database.xlsx");
        assert!(err.to_string().contains("SI_prefixes"));
        assert!(err.to_string().contains("units_database.xlsx"));

        let err = ChempackError::pattern("no stylesheet link tag in shell");
        assert!(err.to_string().contains("stylesheet link"));
    }
}
