//! Error types for the dexsheets application

use std::path::PathBuf;

use thiserror::Error;

use crate::sprites::ApiError;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop a fetch or build run
///
/// Per-species problems (a failed download, a missing record or sprite, a box
/// slot with no checklist row) are logged and skipped; they never surface here.
#[derive(Debug, Error)]
pub enum Error {
    /// File system error on a specific path
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON data file could not be parsed
    #[error("Failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The configuration file could not be parsed
    #[error("Failed to parse config {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A required input file is missing
    #[error("Missing data file {}: {message}", .path.display())]
    Data { path: PathBuf, message: String },

    /// The species catalog could not be fetched
    #[error("Catalog fetch failed: {0}")]
    Http(#[from] ApiError),

    /// Spreadsheet model error
    #[error(transparent)]
    Sheet(#[from] dexsheets_core::Error),

    /// XLSX writer error
    #[error(transparent)]
    Xlsx(#[from] dexsheets_xlsx::XlsxError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Json {
            path: path.into(),
            source,
        }
    }
}
