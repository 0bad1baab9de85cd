use std::collections::HashSet;

use lineage_types::{EventCounter, LineageError, LineageResult};
use tracing::warn;

use crate::graph::LineageGraph;

impl<C: EventCounter> LineageGraph<C> {
    /// Check the invariants the registration protocol maintains:
    ///
    /// - every registry member links the registry's owner
    /// - registries hold each artifact at most once, with stable indices
    /// - artifacts link each origin at most once, and only known origins
    /// - derived artifacts link at least one origin
    pub fn verify(&self) -> LineageResult<()> {
        let result = self.check_registries().and_then(|()| self.check_artifacts());
        if let Err(e) = &result {
            warn!(error = %e, "Lineage graph failed verification");
        }
        result
    }

    fn check_registries(&self) -> LineageResult<()> {
        for registry in self.registries() {
            let owner = registry.owner();
            let mut members = HashSet::new();
            for (position, entry) in registry.list_all().iter().enumerate() {
                if entry.index != position {
                    return Err(LineageError::Inconsistent(format!(
                        "registry of {owner} has entry {} at position {position}",
                        entry.index
                    )));
                }
                if !members.insert(entry.artifact) {
                    return Err(LineageError::Inconsistent(format!(
                        "registry of {owner} lists {} twice",
                        entry.artifact
                    )));
                }
                if !self.artifact(entry.artifact)?.has_origin(owner) {
                    return Err(LineageError::Inconsistent(format!(
                        "{} is registered with {owner} but does not link it",
                        entry.artifact
                    )));
                }
            }
        }
        Ok(())
    }

    fn check_artifacts(&self) -> LineageResult<()> {
        for artifact in self.artifacts() {
            let id = artifact.id();
            let mut origins = HashSet::new();
            for origin in artifact.origins() {
                self.artifact(origin)?;
                if !origins.insert(origin) {
                    return Err(LineageError::Inconsistent(format!(
                        "{id} links {origin} twice"
                    )));
                }
            }
            if !artifact.variant().is_origin() && origins.is_empty() {
                return Err(LineageError::Inconsistent(format!(
                    "derived {id} has no origin"
                )));
            }
        }
        Ok(())
    }
}
