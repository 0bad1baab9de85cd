use lineage_types::{ArtifactId, EventCounter, EventIndex, LineageResult, TypeTag};
use serde::{Deserialize, Serialize};

use crate::graph::LineageGraph;

/// How much of an artifact to persist alongside one origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveMode {
    /// Full payload.
    Full,
    /// Name and modification log only, enough to recreate the artifact.
    IdentityOnly,
}

impl From<bool> for SaveMode {
    fn from(save_behavior: bool) -> Self {
        if save_behavior {
            Self::Full
        } else {
            Self::IdentityOnly
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavePlanEntry {
    pub index: usize,
    pub name: String,
    pub kind: TypeTag,
    pub artifact: ArtifactId,
    pub mode: SaveMode,
    pub modification_log: Vec<EventIndex>,
}

/// What to persist for each member of one origin's registry.
///
/// The same artifact may be `Full` in one origin's plan and `IdentityOnly`
/// in another's.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavePlan {
    pub origin: ArtifactId,
    pub entries: Vec<SavePlanEntry>,
}

impl SavePlan {
    pub fn full(&self) -> impl Iterator<Item = &SavePlanEntry> {
        self.entries.iter().filter(|e| e.mode == SaveMode::Full)
    }

    pub fn identity_only(&self) -> impl Iterator<Item = &SavePlanEntry> {
        self.entries
            .iter()
            .filter(|e| e.mode == SaveMode::IdentityOnly)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C: EventCounter> LineageGraph<C> {
    /// Save plan for the registry owned by `origin`, in registry order.
    pub fn save_plan(&self, origin: ArtifactId) -> LineageResult<SavePlan> {
        let entries = self
            .registry(origin)?
            .list_all()
            .iter()
            .map(|entry| -> LineageResult<SavePlanEntry> {
                let artifact = self.artifact(entry.artifact)?;
                Ok(SavePlanEntry {
                    index: entry.index,
                    name: entry.name.clone(),
                    kind: entry.kind.clone(),
                    artifact: entry.artifact,
                    mode: artifact.save_behavior(origin)?.into(),
                    modification_log: artifact.modification_log().to_vec(),
                })
            })
            .collect::<LineageResult<Vec<_>>>()?;

        Ok(SavePlan { origin, entries })
    }
}
