#![deny(unsafe_code)]
//! # lineage-tracker
//!
//! Provenance and selective-persistence tracking for derived data artifacts.
//!
//! Every artifact records the origin datasets that produced or touched it,
//! a save behavior per origin, and the event indices at which it was
//! created or modified. Every origin dataset owns a [`Registry`] of the
//! artifacts traceable to it.
//!
//! The registration protocol keeps both sides in agreement: linking an
//! origin into an artifact registers the artifact with that origin, and
//! registering an artifact links the registry's owner into it, whichever
//! side the caller starts from.
//!
//! ## Key Types
//!
//! - [`LineageGraph`] — arena owning artifacts and registries; runs the protocol
//! - [`Artifact`] — origin links, save behaviors and modification log
//! - [`Registry`] — per-origin membership with name/type/position lookups
//! - [`Tracked`] — capability of artifact-bearing values, used by [`LineageGraph::observe`]
//! - [`SavePlan`] — per-origin full / identity-only persistence decision
//! - [`listing`] — Index / Name / Type table rendering of query results

pub mod artifact;
pub mod config;
pub mod graph;
pub mod listing;
pub mod observe;
pub mod registry;
pub mod save_plan;
pub mod validation;

pub use artifact::{Artifact, OriginLink};
pub use config::{ListingConfig, ListingStyle, TrackerConfig};
pub use graph::LineageGraph;
pub use observe::Tracked;
pub use registry::{Registry, RegistryEntry};
pub use save_plan::{SaveMode, SavePlan, SavePlanEntry};

pub use lineage_types::{
    ArtifactId, ArtifactVariant, EventCounter, EventIndex, LineageError, LineageResult,
    SharedEventCounter, TypeTag,
};
