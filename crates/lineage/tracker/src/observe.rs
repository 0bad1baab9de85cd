//! Modification logging for values that carry an artifact.
//!
//! A generic wrapper around some mutating action hands its arguments to
//! [`LineageGraph::observe`]. Only types implementing [`Tracked`] can be
//! passed, so "is this value an artifact" is answered by the type system.

use lineage_types::{ArtifactId, EventCounter, EventIndex, LineageResult};

use crate::artifact::Artifact;
use crate::graph::LineageGraph;

/// Capability of artifact-bearing values.
pub trait Tracked {
    /// Handle of the artifact this value carries.
    fn artifact_id(&self) -> ArtifactId;
}

impl Tracked for ArtifactId {
    fn artifact_id(&self) -> ArtifactId {
        *self
    }
}

impl Tracked for Artifact {
    fn artifact_id(&self) -> ArtifactId {
        self.id()
    }
}

impl<T: Tracked + ?Sized> Tracked for &T {
    fn artifact_id(&self) -> ArtifactId {
        (**self).artifact_id()
    }
}

impl<C: EventCounter> LineageGraph<C> {
    /// Record one modification for every distinct artifact among `args`.
    ///
    /// All handles are checked before anything is logged. Returns the
    /// artifacts that were logged, in first-seen order, with the index
    /// written for each.
    pub fn observe(
        &mut self,
        args: &[&dyn Tracked],
    ) -> LineageResult<Vec<(ArtifactId, EventIndex)>> {
        let mut seen: Vec<ArtifactId> = Vec::with_capacity(args.len());
        for arg in args {
            let id = arg.artifact_id();
            self.artifact(id)?;
            if !seen.contains(&id) {
                seen.push(id);
            }
        }

        seen.into_iter()
            .map(|id| self.record_modification(id).map(|index| (id, index)))
            .collect()
    }
}
