//! Error types for recording replay

use std::path::PathBuf;
use thiserror::Error;

/// Errors during recording file reading. Malformed lines are not errors;
/// they are skipped at the parser.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to open recording {path}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to memory map recording {path}")]
    MemoryMap {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to seek in recording {path}")]
    Seek {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read recording {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("recording {path} has no parseable date in its filename")]
    MissingSessionDate { path: PathBuf },
}
