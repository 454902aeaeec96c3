//! # Dartforge Registry
//!
//! Data model and lookup registries for the Dartforge generation engine.
//!
//! Widget types, property schemas, code templates, and generation rules are
//! plain data loaded from an external store (JSON files in the reference
//! tooling). Nothing here contains generation logic; the registries are
//! read-only snapshots consumed by `dartforge-generator`.

pub mod model;
pub mod registry;

pub use model::*;
pub use registry::*;
