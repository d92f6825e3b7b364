//! Manifest file loading

use log::debug;
use std::fs;
use std::path::Path;

use crate::error::{KubeTmuxpError, Result};

use super::models::{ClusterSpec, ProjectEntry};
use super::validate::validate;

/// Read, parse and validate the manifest at `path`
pub fn load_manifest(path: &Path) -> Result<Vec<ClusterSpec>> {
    debug!("Loading manifest from {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| {
        KubeTmuxpError::Manifest(format!("could not read {}: {}", path.display(), e))
    })?;

    let clusters = parse_manifest(&content).map_err(|e| match e {
        KubeTmuxpError::Manifest(msg) => {
            KubeTmuxpError::Manifest(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })?;

    debug!(
        "Manifest {} describes {} cluster(s)",
        path.display(),
        clusters.len()
    );
    Ok(clusters)
}

/// Parse and validate manifest content
pub fn parse_manifest(content: &str) -> Result<Vec<ClusterSpec>> {
    // An empty document deserializes as null, not as an empty sequence
    let projects: Option<Vec<ProjectEntry>> = serde_yml::from_str(content)?;
    validate(projects.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Location;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
- project: proj1
  clusters:
    - name: c1
      zone: us-central1-a
      context: ctx1
    - name: c2
      region: us-central1
      context: ctx2
      extra_envs:
        FOO: bar
- project: proj2
  clusters:
    - name: c3
      zone: europe-west1-b
      context: ctx3
"#;

    #[test]
    fn test_parse_manifest() {
        let clusters = parse_manifest(MANIFEST).unwrap();
        assert_eq!(clusters.len(), 3);

        assert_eq!(clusters[0].project, "proj1");
        assert_eq!(clusters[0].name, "c1");
        assert_eq!(clusters[0].context, "ctx1");
        assert_eq!(
            clusters[0].location,
            Location::Zonal("us-central1-a".to_string())
        );
        assert!(clusters[0].extra_envs.is_empty());

        assert!(clusters[1].location.is_regional());
        assert_eq!(clusters[1].extra_envs["FOO"], "bar");

        assert_eq!(clusters[2].project, "proj2");
    }

    #[test]
    fn test_parse_domain_scoped_project() {
        let clusters = parse_manifest(
            "- project: google.com:my-proj\n  clusters:\n    - {name: c1, zone: us-central1-a, context: ctx1}\n",
        )
        .unwrap();
        assert_eq!(clusters[0].project, "google.com:my-proj");
        assert_eq!(clusters[0].context, "ctx1");
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_manifest("- project: [unclosed\n");
        assert!(matches!(result, Err(KubeTmuxpError::Manifest(_))));
    }

    #[test]
    fn test_parse_missing_clusters_key() {
        let err = parse_manifest("- project: proj1\n").unwrap_err();
        assert!(err.to_string().contains("missing field `clusters`"));
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parse_manifest("").is_err());
        assert!(parse_manifest("~\n").is_err());
    }

    #[test]
    fn test_parse_wrong_top_level_shape() {
        let result = parse_manifest("project: proj1\n");
        assert!(matches!(result, Err(KubeTmuxpError::Manifest(_))));
    }

    #[test]
    fn test_load_manifest_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clusters.yaml");
        fs::write(&path, MANIFEST).unwrap();

        let clusters = load_manifest(&path).unwrap();
        assert_eq!(clusters.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.yaml");
        let err = load_manifest(&path).unwrap_err();
        assert!(err.to_string().contains("could not read"));
    }

    #[test]
    fn test_load_error_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "- project: p\n  clusters: {{\n").unwrap();
        let err = load_manifest(&path).unwrap_err();
        assert!(err.to_string().contains("broken.yaml"));
    }
}
