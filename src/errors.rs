use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CertError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot read spreadsheet {path}: {message}")]
    Spreadsheet { path: PathBuf, message: String },

    /// The sheet has no non-empty row to take column names from.
    #[error("spreadsheet {0} has no header row")]
    MissingHeader(PathBuf),

    #[error("invalid event date '{0}', expected DD-MM-YYYY")]
    InvalidDate(String),

    #[error("input closed before the answer was given")]
    InputClosed,
}

impl CertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CertError::Io { path: path.into(), source }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        CertError::Json { path: path.into(), source }
    }
}
