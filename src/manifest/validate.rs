//! Up-front manifest validation
//!
//! Every entry is checked before any side effect happens, so a typo in the
//! last cluster cannot leave the first one with its credentials deleted.

use log::warn;
use std::collections::HashSet;

use crate::error::{KubeTmuxpError, Result};

use super::models::{ClusterEntry, ClusterSpec, Location, ProjectEntry};

/// Punctuation allowed in names, contexts, zones and regions
const IDENTIFIER_CHARS: &[char] = &['.', '_', '-'];

/// Project IDs may also carry a legacy domain scope (`example.com:my-proj`)
const PROJECT_CHARS: &[char] = &['.', '_', '-', ':'];

/// Validate all entries and flatten them into processing order
pub fn validate(projects: Vec<ProjectEntry>) -> Result<Vec<ClusterSpec>> {
    if projects.is_empty() {
        return Err(KubeTmuxpError::Validation(
            "manifest contains no projects".to_string(),
        ));
    }

    let mut specs = Vec::new();
    let mut seen_contexts = HashSet::new();

    for (p_idx, project) in projects.into_iter().enumerate() {
        let project_label = format!("projects[{}]", p_idx);
        check_identifier(&project_label, "project", &project.project, PROJECT_CHARS)?;

        for (c_idx, cluster) in project.clusters.into_iter().enumerate() {
            let label = format!("{} ({}) clusters[{}]", project_label, project.project, c_idx);
            let spec = validate_cluster(&label, &project.project, cluster)?;

            if !seen_contexts.insert(spec.context.clone()) {
                warn!(
                    "Context '{}' appears more than once; the last entry wins",
                    spec.context
                );
            }
            specs.push(spec);
        }
    }

    Ok(specs)
}

fn validate_cluster(label: &str, project: &str, cluster: ClusterEntry) -> Result<ClusterSpec> {
    check_identifier(label, "name", &cluster.name, IDENTIFIER_CHARS)?;
    check_identifier(label, "context", &cluster.context, IDENTIFIER_CHARS)?;

    let location = match (cluster.region, cluster.zone) {
        (Some(region), zone) => {
            if zone.is_some() {
                warn!(
                    "{}: both `zone` and `region` set for cluster '{}'; using region {}",
                    label, cluster.name, region
                );
            }
            check_identifier(label, "region", &region, IDENTIFIER_CHARS)?;
            Location::Regional(region)
        }
        (None, Some(zone)) => {
            check_identifier(label, "zone", &zone, IDENTIFIER_CHARS)?;
            Location::Zonal(zone)
        }
        (None, None) => {
            return Err(KubeTmuxpError::Validation(format!(
                "{}: cluster '{}' needs either a `zone` or a `region`",
                label, cluster.name
            )))
        }
    };

    for (key, value) in &cluster.extra_envs {
        if !is_env_name(key) {
            return Err(KubeTmuxpError::Validation(format!(
                "{}: extra_envs key '{}' is not a valid variable name",
                label, key
            )));
        }
        if value.contains(['\n', '\r']) {
            return Err(KubeTmuxpError::Validation(format!(
                "{}: extra_envs value for '{}' must be a single line",
                label, key
            )));
        }
    }

    Ok(ClusterSpec {
        project: project.to_string(),
        name: cluster.name,
        context: cluster.context,
        location,
        extra_envs: cluster.extra_envs,
    })
}

/// Values end up as command arguments and file names: allow ASCII
/// alphanumerics plus `allowed`, refuse a leading dash and the `.`/`..` path
/// components.
fn check_identifier(label: &str, field: &str, value: &str, allowed: &[char]) -> Result<()> {
    if value.is_empty() {
        return Err(KubeTmuxpError::Validation(format!(
            "{}: `{}` must not be empty",
            label, field
        )));
    }
    if value.starts_with('-') || value == "." || value == ".." {
        return Err(KubeTmuxpError::Validation(format!(
            "{}: `{}` value '{}' is not allowed",
            label, field, value
        )));
    }
    if let Some(bad) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || allowed.contains(c)))
    {
        return Err(KubeTmuxpError::Validation(format!(
            "{}: `{}` value '{}' contains invalid character {:?}",
            label, field, value, bad
        )));
    }
    Ok(())
}

fn is_env_name(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
