//! Error types for table parsing, host calls and fatal run conditions.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn adjustment table text into records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("adjustment table has no header line")]
    MissingHeader,

    #[error("adjustment table header has no {column} column")]
    MissingColumn { column: &'static str },

    #[error("adjustment table line {line}: expected {expected} fields, found {found}")]
    ShortRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("adjustment table is not readable text: {0}")]
    Csv(String),
}

impl From<csv::Error> for ParseError {
    fn from(err: csv::Error) -> Self {
        ParseError::Csv(err.to_string())
    }
}

/// Failure reported by a document host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("cannot open {path}: {reason}")]
    Open { path: PathBuf, reason: String },

    #[error("cannot select {kind} artwork for spot {spot}: {reason}")]
    Select {
        spot: String,
        kind: String,
        reason: String,
    },

    #[error("cannot apply blend mode: {0}")]
    Apply(String),

    #[error("cannot export to {path}: {reason}")]
    Export { path: PathBuf, reason: String },
}

/// Conditions that stop a whole run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("source folder {0} does not exist or is not a folder")]
    SourceFolder(PathBuf),

    #[error("cannot read adjustment file {path}")]
    AdjustmentFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("adjustment file {path} is not a usable table")]
    Table {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("cannot create output folder {path}")]
    OutputFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot list source folder {path}")]
    Listing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write run log {path}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
