use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Concrete type of an artifact, recorded in every registry entry.
///
/// The tracker never interprets the tag; it only groups and filters by
/// exact equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeTag(Cow<'static, str>);

impl TypeTag {
    /// Tag from a static type name, usable in `const` position.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for TypeTag {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for TypeTag {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Whether an artifact is a top-level origin dataset or derived from one.
///
/// Origin artifacts own a registry and may have no origins of their own.
/// Derived artifacts always link at least one origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactVariant {
    Origin,
    Derived,
}

impl ArtifactVariant {
    pub fn is_origin(&self) -> bool {
        matches!(self, Self::Origin)
    }
}

impl fmt::Display for ArtifactVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => write!(f, "origin"),
            Self::Derived => write!(f, "derived"),
        }
    }
}
