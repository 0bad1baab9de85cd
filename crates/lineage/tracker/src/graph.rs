use std::collections::BTreeMap;

use lineage_types::{
    ArtifactId, ArtifactVariant, EventCounter, EventIndex, LineageError, LineageResult,
    SharedEventCounter, TypeTag,
};
use tracing::{debug, info, trace};

use crate::artifact::{Artifact, LinkChange};
use crate::config::TrackerConfig;
use crate::registry::Registry;

/// Arena owning every artifact and registry of one lineage graph.
///
/// Artifacts and registries refer to one another only through
/// [`ArtifactId`] handles. The two mutation entry points, [`add_origin`]
/// and [`register`], call into each other until both sides agree:
/// each hop flips a membership check (`has_origin` / `contains`) from
/// false to true before recursing, so the mutual recursion terminates.
///
/// [`add_origin`]: LineageGraph::add_origin
/// [`register`]: LineageGraph::register
#[derive(Debug)]
pub struct LineageGraph<C: EventCounter = SharedEventCounter> {
    counter: C,
    config: TrackerConfig,
    artifacts: Vec<Artifact>,
    /// Keyed by owner; handles are assigned in creation order.
    registries: BTreeMap<ArtifactId, Registry>,
}

impl<C: EventCounter> LineageGraph<C> {
    pub fn new(counter: C) -> Self {
        Self::with_config(counter, TrackerConfig::default())
    }

    pub fn with_config(counter: C, config: TrackerConfig) -> Self {
        Self {
            counter,
            config,
            artifacts: Vec::new(),
            registries: BTreeMap::new(),
        }
    }

    // =========================================================================
    // ARTIFACT LIFECYCLE
    // =========================================================================

    /// Create an artifact.
    ///
    /// With an origin, the artifact is derived: it links the origin and is
    /// registered in the origin's registry. Without one, it is an origin
    /// dataset and gets a registry of its own. Either way one modification
    /// is logged.
    pub fn create(
        &mut self,
        origin: Option<ArtifactId>,
        save_behavior: Option<bool>,
        name: impl Into<String>,
        kind: impl Into<TypeTag>,
    ) -> LineageResult<ArtifactId> {
        if let Some(origin) = origin {
            self.artifact(origin)?;
        }
        let index = u32::try_from(self.artifacts.len())
            .map_err(|_| LineageError::ArenaExhausted)?;
        let id = ArtifactId::new(index);
        let save_behavior = save_behavior.unwrap_or(self.config.default_save_behavior);
        let variant = match origin {
            Some(_) => ArtifactVariant::Derived,
            None => ArtifactVariant::Origin,
        };

        self.artifacts.push(Artifact::new(
            id,
            name.into(),
            kind.into(),
            variant,
            save_behavior,
        ));
        if variant.is_origin() {
            self.registries.insert(id, Registry::new(id));
            info!(artifact = %id, "Origin dataset created with registry");
        }

        self.add_origin(id, origin, Some(save_behavior))?;
        self.record_modification(id)?;

        Ok(id)
    }

    /// Create an origin dataset with the configured default save behavior.
    pub fn create_origin(
        &mut self,
        name: impl Into<String>,
        kind: impl Into<TypeTag>,
    ) -> LineageResult<ArtifactId> {
        self.create(None, None, name, kind)
    }

    /// Create a derived artifact of `origin`.
    pub fn create_derived(
        &mut self,
        origin: ArtifactId,
        save_behavior: Option<bool>,
        name: impl Into<String>,
        kind: impl Into<TypeTag>,
    ) -> LineageResult<ArtifactId> {
        self.create(Some(origin), save_behavior, name, kind)
    }

    // =========================================================================
    // REGISTRATION PROTOCOL
    // =========================================================================

    /// Link `origin` into `artifact`, then make sure every registry one hop
    /// away holds the artifact.
    ///
    /// An absent origin is a no-op. Linking an origin twice overwrites its
    /// save behavior (last write wins) instead of duplicating it. The hop
    /// covers the registry owned by the origin, if any, and those owned by
    /// the origin's direct origins. Registries further out register the
    /// artifact through their own calls into [`register`].
    ///
    /// [`register`]: LineageGraph::register
    pub fn add_origin(
        &mut self,
        artifact: ArtifactId,
        origin: Option<ArtifactId>,
        save_behavior: Option<bool>,
    ) -> LineageResult<()> {
        self.artifact(artifact)?;
        let Some(origin) = origin else {
            return Ok(());
        };
        self.artifact(origin)?;

        let node = self.artifact_mut(artifact)?;
        let save_behavior = save_behavior.unwrap_or(node.default_save_behavior());
        match node.link_origin(origin, save_behavior) {
            LinkChange::Added => {
                debug!(%artifact, %origin, save_behavior, "Origin linked")
            }
            LinkChange::Updated => {
                debug!(%artifact, %origin, save_behavior, "Origin save behavior updated")
            }
        }

        for owner in self.one_hop_registries(artifact, origin) {
            if !self.registry(owner)?.contains(artifact) {
                self.register(owner, artifact, Some(save_behavior), None)?;
            }
        }

        Ok(())
    }

    /// Add `artifact` to the registry owned by `owner`, then make sure the
    /// artifact links `owner` as an origin.
    ///
    /// The entry name defaults to the artifact's name and the save behavior
    /// to the artifact's default. Registering a member again adds no entry,
    /// but still closes the loop if the artifact lost sight of the owner.
    pub fn register(
        &mut self,
        owner: ArtifactId,
        artifact: ArtifactId,
        save_behavior: Option<bool>,
        name: Option<&str>,
    ) -> LineageResult<()> {
        let node = self.artifact(artifact)?;
        self.artifact(owner)?;
        let save_behavior = save_behavior.unwrap_or(node.default_save_behavior());
        let entry_name = name.map_or_else(|| node.name().to_owned(), str::to_owned);
        let kind = node.kind().clone();
        let linked = node.has_origin(owner);

        let registry = self
            .registries
            .get_mut(&owner)
            .ok_or(LineageError::MissingRegistry(owner))?;
        if registry.insert(artifact, entry_name, kind) {
            debug!(%owner, %artifact, index = registry.len() - 1, "Artifact registered");
        }

        if !linked {
            self.add_origin(artifact, Some(owner), Some(save_behavior))?;
        }

        Ok(())
    }

    /// Owners of the registries one hop from `origin`: its own and those of
    /// its direct origins. The artifact's own registry is never a target.
    fn one_hop_registries(&self, artifact: ArtifactId, origin: ArtifactId) -> Vec<ArtifactId> {
        let mut owners = Vec::new();
        let upstream = self
            .artifacts
            .get(origin.index())
            .map(Artifact::origins)
            .unwrap_or_default();
        for owner in std::iter::once(origin).chain(upstream) {
            if owner != artifact
                && self.registries.contains_key(&owner)
                && !owners.contains(&owner)
            {
                owners.push(owner);
            }
        }
        owners
    }

    // =========================================================================
    // ARTIFACT ACCESSORS
    // =========================================================================

    pub fn origins(&self, artifact: ArtifactId) -> LineageResult<Vec<ArtifactId>> {
        Ok(self.artifact(artifact)?.origins())
    }

    pub fn has_origin(&self, artifact: ArtifactId, origin: ArtifactId) -> LineageResult<bool> {
        Ok(self.artifact(artifact)?.has_origin(origin))
    }

    /// Save behavior of the `artifact`–`origin` relationship.
    pub fn save_behavior(&self, artifact: ArtifactId, origin: ArtifactId) -> LineageResult<bool> {
        self.artifact(artifact)?.save_behavior(origin)
    }

    /// Change the save behavior of an existing relationship.
    pub fn set_save_behavior(
        &mut self,
        artifact: ArtifactId,
        origin: ArtifactId,
        save_behavior: bool,
    ) -> LineageResult<()> {
        self.artifact_mut(artifact)?
            .set_save_behavior(origin, save_behavior)?;
        debug!(%artifact, %origin, save_behavior, "Save behavior changed");
        Ok(())
    }

    /// Log a modification of `artifact` at `current_index() - 1`.
    pub fn record_modification(&mut self, artifact: ArtifactId) -> LineageResult<EventIndex> {
        let node = self
            .artifacts
            .get_mut(artifact.index())
            .ok_or(LineageError::InvalidArtifact(artifact))?;
        let index = node.record_modification(&self.counter);
        trace!(%artifact, event_index = index, "Modification recorded");
        Ok(index)
    }

    // =========================================================================
    // UTILITY
    // =========================================================================

    pub fn artifact(&self, id: ArtifactId) -> LineageResult<&Artifact> {
        self.artifacts
            .get(id.index())
            .ok_or(LineageError::InvalidArtifact(id))
    }

    fn artifact_mut(&mut self, id: ArtifactId) -> LineageResult<&mut Artifact> {
        self.artifacts
            .get_mut(id.index())
            .ok_or(LineageError::InvalidArtifact(id))
    }

    #[cfg(test)]
    pub(crate) fn artifacts_mut(&mut self) -> &mut Vec<Artifact> {
        &mut self.artifacts
    }

    #[cfg(test)]
    pub(crate) fn registry_mut(&mut self, owner: ArtifactId) -> Option<&mut Registry> {
        self.registries.get_mut(&owner)
    }

    /// Registry owned by `owner`.
    pub fn registry(&self, owner: ArtifactId) -> LineageResult<&Registry> {
        self.artifact(owner)?;
        self.registries
            .get(&owner)
            .ok_or(LineageError::MissingRegistry(owner))
    }

    /// Is `artifact` a member of the registry owned by `owner`?
    pub fn contains(&self, owner: ArtifactId, artifact: ArtifactId) -> LineageResult<bool> {
        Ok(self.registry(owner)?.contains(artifact))
    }

    /// All artifacts in creation order.
    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    /// All registries in the creation order of their owners.
    pub fn registries(&self) -> impl Iterator<Item = &Registry> {
        self.registries.values()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn counter(&self) -> &C {
        &self.counter
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}

impl Default for LineageGraph<SharedEventCounter> {
    fn default() -> Self {
        Self::new(SharedEventCounter::new())
    }
}
