#![deny(unsafe_code)]
//! # lineage-types
//!
//! Shared vocabulary for dataset lineage tracking.
//!
//! - [`ArtifactId`] — non-owning handle to an artifact held by the lineage arena
//! - [`EventIndex`] / [`EventCounter`] — the process-wide event counter contract
//! - [`TypeTag`] — the concrete artifact type recorded in registry entries
//! - [`ArtifactVariant`] — origin datasets versus derived artifacts
//! - [`LineageError`] — every failure the tracker can report

pub mod counter;
pub mod error;
pub mod id;
pub mod kind;

pub use counter::{EventCounter, EventIndex, SharedEventCounter};
pub use error::{LineageError, LineageResult};
pub use id::ArtifactId;
pub use kind::{ArtifactVariant, TypeTag};
