use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to an artifact owned by a lineage arena.
///
/// Handles are dense indices assigned in creation order. They carry no
/// lifetime: an artifact refers to its origins, and a registry to its
/// members, only through handles, so neither side keeps the other alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArtifactId(pub u32);

impl ArtifactId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Position of the artifact in its arena.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "artifact:{}", self.0)
    }
}
