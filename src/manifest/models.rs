//! Manifest data models

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::gcloud;

/// One project entry as written in the manifest
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectEntry {
    /// GCP project id
    pub project: String,
    /// Clusters in the project, processed in order
    pub clusters: Vec<ClusterEntry>,
}

/// One cluster entry as written in the manifest
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterEntry {
    /// GKE cluster name
    pub name: String,
    /// Desired kubectl context alias
    pub context: String,
    /// Zone of a zonal cluster
    #[serde(default)]
    pub zone: Option<String>,
    /// Region of a regional cluster
    #[serde(default)]
    pub region: Option<String>,
    /// Extra variables exported in the tmuxp session
    #[serde(default, deserialize_with = "scalar_map")]
    pub extra_envs: BTreeMap<String, String>,
}

/// Accept any scalar as an env value (`PORT: 8080` is common in manifests)
fn scalar_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, serde_yml::Value>> = Option::deserialize(deserializer)?;
    raw.unwrap_or_default()
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                serde_yml::Value::String(s) => s,
                serde_yml::Value::Number(n) => n.to_string(),
                serde_yml::Value::Bool(b) => b.to_string(),
                serde_yml::Value::Null => String::new(),
                _ => {
                    return Err(D::Error::custom(format!(
                        "extra_envs.{} must be a string, number or boolean",
                        key
                    )))
                }
            };
            Ok((key, value))
        })
        .collect()
}

/// Where a cluster lives, which decides how credentials are fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Single-zone cluster (`--zone`)
    Zonal(String),
    /// Regional cluster (`--region`)
    Regional(String),
}

impl Location {
    /// Zone or region name
    pub fn name(&self) -> &str {
        match self {
            Location::Zonal(zone) => zone,
            Location::Regional(region) => region,
        }
    }

    /// gcloud flag addressing this location
    pub fn flag(&self) -> &'static str {
        match self {
            Location::Zonal(_) => "--zone",
            Location::Regional(_) => "--region",
        }
    }

    pub fn is_regional(&self) -> bool {
        matches!(self, Location::Regional(_))
    }

    /// Short label used in logs and the run summary
    pub fn mode(&self) -> &'static str {
        match self {
            Location::Zonal(_) => "zonal",
            Location::Regional(_) => "regional",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.mode())
    }
}

/// A validated cluster, flattened with its project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterSpec {
    pub project: String,
    pub name: String,
    pub context: String,
    pub location: Location,
    pub extra_envs: BTreeMap<String, String>,
}

impl ClusterSpec {
    /// Context name `gcloud container clusters get-credentials` writes for this cluster
    pub fn generated_context(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            gcloud::CONTEXT_PREFIX,
            self.project,
            self.location.name(),
            self.name
        )
    }
}
