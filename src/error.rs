//! Error types for the session core and result export.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{GameId, Stage};

/// A rejected session transition. The session state is never modified when
/// one of these is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("session already started (current stage: {stage})")]
    NotAtIntro { stage: Stage },

    #[error("{reported} reported completion while the session is at {expected}")]
    OutOfSequence { expected: Stage, reported: GameId },
}

/// Failure while writing a result card to disk.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("results are not available before the last game finishes")]
    NotFinished,

    #[error("failed to encode result card")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write result card to {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
