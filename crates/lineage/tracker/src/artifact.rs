use lineage_types::{
    ArtifactId, ArtifactVariant, EventCounter, EventIndex, LineageError, LineageResult, TypeTag,
};
use serde::{Deserialize, Serialize};

/// One origin relationship of an artifact, with its own save policy.
///
/// `save_behavior = true` persists the full payload alongside this origin;
/// `false` persists only the artifact's identity and history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginLink {
    pub origin: ArtifactId,
    pub save_behavior: bool,
}

/// Outcome of linking an origin into an artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LinkChange {
    Added,
    Updated,
}

/// A node in the lineage graph.
///
/// Records which origins produced or touched the artifact, the save policy
/// per origin, and the event indices at which it was created or modified.
/// Links are unique by origin and keep insertion order; the log is
/// append-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Artifact {
    id: ArtifactId,
    name: String,
    kind: TypeTag,
    variant: ArtifactVariant,
    default_save_behavior: bool,
    origin_links: Vec<OriginLink>,
    modification_log: Vec<EventIndex>,
}

impl Artifact {
    pub(crate) fn new(
        id: ArtifactId,
        name: String,
        kind: TypeTag,
        variant: ArtifactVariant,
        default_save_behavior: bool,
    ) -> Self {
        Self {
            id,
            name,
            kind,
            variant,
            default_save_behavior,
            origin_links: Vec::new(),
            modification_log: Vec::new(),
        }
    }

    pub fn id(&self) -> ArtifactId {
        self.id
    }

    /// Artifact name. Empty means unnamed.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }

    pub fn kind(&self) -> &TypeTag {
        &self.kind
    }

    pub fn variant(&self) -> ArtifactVariant {
        self.variant
    }

    /// Save behavior used when a new origin is linked without an explicit one.
    pub fn default_save_behavior(&self) -> bool {
        self.default_save_behavior
    }

    pub fn origin_links(&self) -> &[OriginLink] {
        &self.origin_links
    }

    /// Linked origins in the order they were first linked.
    pub fn origins(&self) -> Vec<ArtifactId> {
        self.origin_links.iter().map(|link| link.origin).collect()
    }

    pub fn has_origin(&self, origin: ArtifactId) -> bool {
        self.position_of(origin).is_some()
    }

    /// Save behavior for a linked origin.
    pub fn save_behavior(&self, origin: ArtifactId) -> LineageResult<bool> {
        self.position_of(origin)
            .map(|i| self.origin_links[i].save_behavior)
            .ok_or(LineageError::UnknownOrigin {
                artifact: self.id,
                origin,
            })
    }

    pub fn modification_log(&self) -> &[EventIndex] {
        &self.modification_log
    }

    /// Change the save behavior of an already linked origin, in place.
    pub(crate) fn set_save_behavior(
        &mut self,
        origin: ArtifactId,
        save_behavior: bool,
    ) -> LineageResult<()> {
        let i = self.position_of(origin).ok_or(LineageError::UnknownOrigin {
            artifact: self.id,
            origin,
        })?;
        self.origin_links[i].save_behavior = save_behavior;
        Ok(())
    }

    /// Link an origin, or overwrite its save behavior if already linked.
    pub(crate) fn link_origin(&mut self, origin: ArtifactId, save_behavior: bool) -> LinkChange {
        match self.position_of(origin) {
            Some(i) => {
                self.origin_links[i].save_behavior = save_behavior;
                LinkChange::Updated
            }
            None => {
                self.origin_links.push(OriginLink {
                    origin,
                    save_behavior,
                });
                LinkChange::Added
            }
        }
    }

    /// Append `current_index() - 1`: the triggering action has already
    /// advanced the counter by the time this runs.
    pub(crate) fn record_modification<C: EventCounter + ?Sized>(
        &mut self,
        counter: &C,
    ) -> EventIndex {
        let index = counter.current_index() - 1;
        self.modification_log.push(index);
        index
    }

    fn position_of(&self, origin: ArtifactId) -> Option<usize> {
        self.origin_links.iter().position(|link| link.origin == origin)
    }
}
