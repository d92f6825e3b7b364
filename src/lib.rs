//! kube-tmuxp - kubectl contexts and tmuxp sessions for GKE clusters
//!
//! Reads a YAML manifest of projects and clusters and, for each cluster:
//!
//! - removes the stale kubeconfig at `~/.kube/configs/<context>`
//! - fetches fresh credentials with `gcloud container clusters get-credentials`,
//!   scoped to that file through `KUBECONFIG`
//! - renames the generated `gke_<project>_<location>_<cluster>` context to `<context>`
//! - renders `templates/tmuxp-config.yaml.j2` into `~/.tmuxp/<context>.yaml`
//!
//! # Example
//!
//! ```bash
//! # Provision everything in the manifest
//! kube-tmuxp clusters.yaml
//!
//! # Show what would run
//! kube-tmuxp --dry-run clusters.yaml
//!
//! # Don't stop at the first broken cluster
//! kube-tmuxp --keep-going clusters.yaml
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod kube;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod tmuxp;
pub mod workspace;

pub use cli::{Cli, OutputFormat};
pub use config::Settings;
pub use error::{KubeTmuxpError, Result};
pub use kube::{CommandRunner, ContextDriver, Invocation};
pub use manifest::{load_manifest, ClusterSpec, Location};
pub use output::output_summary;
pub use pipeline::{process_clusters, run_manifest, ClusterOutcome, RunSummary};
pub use tmuxp::SessionRenderer;
