use thiserror::Error;

use crate::id::ArtifactId;

/// Errors from lineage tracking.
///
/// All of these indicate a violated precondition rather than a transient
/// condition. Operations validate before mutating, so a failed call leaves
/// the tracker unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineageError {
    #[error("unknown origin: {artifact} has no link to {origin}")]
    UnknownOrigin {
        artifact: ArtifactId,
        origin: ArtifactId,
    },

    #[error("invalid artifact: {0} is not tracked")]
    InvalidArtifact(ArtifactId),

    #[error("index {index} out of range for registry of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{0} does not own a registry")]
    MissingRegistry(ArtifactId),

    #[error("artifact arena exhausted: no handle left for a new artifact")]
    ArenaExhausted,

    #[error("lineage graph inconsistent: {0}")]
    Inconsistent(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type LineageResult<T> = Result<T, LineageError>;
