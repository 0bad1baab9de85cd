use lineage_types::{LineageError, LineageResult};
use serde::{Deserialize, Serialize};

/// Tracker configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Save behavior given to artifacts created without an explicit one.
    pub default_save_behavior: bool,
    /// Formatting of rendered registry listings.
    pub listing: ListingConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            default_save_behavior: true,
            listing: ListingConfig::default(),
        }
    }
}

impl TrackerConfig {
    /// New artifacts persist identity and history only unless told otherwise.
    pub fn identity_only() -> Self {
        Self {
            default_save_behavior: false,
            ..Self::default()
        }
    }

    /// Load configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml(content: &str) -> LineageResult<Self> {
        toml::from_str(content).map_err(|e| LineageError::Config(e.to_string()))
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> LineageResult<String> {
        toml::to_string_pretty(self).map_err(|e| LineageError::Config(e.to_string()))
    }
}

/// Table style for listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStyle {
    #[default]
    Plain,
    Ascii,
    Markdown,
    Rounded,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Names longer than this are truncated in the rendered table.
    pub name_width: usize,
    pub style: ListingStyle,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            name_width: 48,
            style: ListingStyle::Plain,
        }
    }
}
