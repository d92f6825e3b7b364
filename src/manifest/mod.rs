//! Cluster manifest
//!
//! Loads the YAML list of projects and clusters, checks it, and flattens
//! it into [`ClusterSpec`]s in the order they should be processed.

mod loader;
mod models;
mod validate;

pub use loader::{load_manifest, parse_manifest};
pub use models::{ClusterEntry, ClusterSpec, Location, ProjectEntry};
pub use validate::validate;
