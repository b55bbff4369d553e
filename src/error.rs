use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the editing core.
///
/// Out-of-range row and column requests are never errors: they are clamped
/// or ignored where they happen. Only file and config I/O reach the caller.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Save was requested but the document has no filename.
    #[error("save aborted: no filename")]
    NoFilename,

    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl EditorError {
    /// Was this a missing file (as opposed to an unreadable one)?
    pub fn is_not_found(&self) -> bool {
        match self {
            EditorError::Open { source, .. }
            | EditorError::Save { source, .. }
            | EditorError::ConfigRead { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
