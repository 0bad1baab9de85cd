use lineage_types::{ArtifactId, LineageError, LineageResult, TypeTag};
use serde::{Deserialize, Serialize};

/// One artifact traceable to a registry's owner.
///
/// `index` is the entry's position at insertion time and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub index: usize,
    pub name: String,
    pub kind: TypeTag,
    pub artifact: ArtifactId,
}

/// Canonical, ordered membership list of every artifact traceable to one
/// origin dataset.
///
/// Entries are unique by artifact and only ever appended. Every member
/// links the owner as one of its origins once a protocol call returns.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Registry {
    owner: ArtifactId,
    entries: Vec<RegistryEntry>,
}

impl Registry {
    pub(crate) fn new(owner: ArtifactId) -> Self {
        Self {
            owner,
            entries: Vec::new(),
        }
    }

    /// The origin dataset this registry belongs to.
    pub fn owner(&self) -> ArtifactId {
        self.owner
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, artifact: ArtifactId) -> bool {
        self.entries.iter().any(|e| e.artifact == artifact)
    }

    /// All entries in insertion order.
    pub fn list_all(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Named entries first, then unnamed ones; insertion order within each.
    pub fn sort_by_name(&self) -> Vec<&RegistryEntry> {
        let (named, unnamed): (Vec<_>, Vec<_>) =
            self.entries.iter().partition(|e| !e.name.is_empty());
        named.into_iter().chain(unnamed).collect()
    }

    /// With a tag, only entries of exactly that type. Without, every entry
    /// grouped by type in order of each type's first appearance.
    pub fn sort_by_type(&self, kind: Option<&TypeTag>) -> Vec<&RegistryEntry> {
        if let Some(kind) = kind {
            return self.entries.iter().filter(|e| &e.kind == kind).collect();
        }

        let mut kinds: Vec<&TypeTag> = Vec::new();
        for entry in &self.entries {
            if !kinds.contains(&&entry.kind) {
                kinds.push(&entry.kind);
            }
        }

        kinds
            .into_iter()
            .flat_map(|kind| self.entries.iter().filter(move |e| &e.kind == kind))
            .collect()
    }

    /// Entries whose name equals `name` (`exact`) or contains it.
    pub fn find_entries_by_name(&self, name: &str, exact: bool) -> Vec<&RegistryEntry> {
        self.entries
            .iter()
            .filter(|e| {
                if exact {
                    e.name == name
                } else {
                    e.name.contains(name)
                }
            })
            .collect()
    }

    /// Artifacts whose entry name equals `name` (`exact`) or contains it.
    pub fn find_by_name(&self, name: &str, exact: bool) -> Vec<ArtifactId> {
        self.find_entries_by_name(name, exact)
            .into_iter()
            .map(|e| e.artifact)
            .collect()
    }

    pub fn entry(&self, index: usize) -> LineageResult<&RegistryEntry> {
        self.entries.get(index).ok_or(LineageError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    pub fn get_by_index(&self, index: usize) -> LineageResult<ArtifactId> {
        self.entry(index).map(|e| e.artifact)
    }

    /// Append an entry unless the artifact is already a member.
    pub(crate) fn insert(&mut self, artifact: ArtifactId, name: String, kind: TypeTag) -> bool {
        if self.contains(artifact) {
            return false;
        }
        self.entries.push(RegistryEntry {
            index: self.entries.len(),
            name,
            kind,
            artifact,
        });
        true
    }

    #[cfg(test)]
    pub(crate) fn entries_mut(&mut self) -> &mut Vec<RegistryEntry> {
        &mut self.entries
    }
}
