//! gcloud and kubectl command construction

use crate::config::{gcloud, kubectl, Settings};
use crate::manifest::ClusterSpec;

use super::invocation::Invocation;

/// `gcloud container clusters get-credentials`, scoped to the cluster's own kubeconfig.
///
/// Regional clusters go through the beta track with the v1 API client
/// disabled unless `force_v2_api` is off.
pub fn fetch_credentials(settings: &Settings, cluster: &ClusterSpec) -> Invocation {
    // Lossless: store paths are checked for UTF-8 in `Settings::from_cli`
    let kubeconfig = settings.kubeconfig_path(&cluster.context);
    let mut invocation = Invocation::new(&settings.gcloud_bin);

    let beta = cluster.location.is_regional() && settings.force_v2_api;
    if beta {
        for (key, value) in gcloud::V2_API_ENV {
            invocation = invocation.env(*key, *value);
        }
        invocation = invocation.arg("beta");
    }

    invocation
        .env(kubectl::KUBECONFIG_ENV, kubeconfig.to_string_lossy())
        .args(["container", "clusters", "get-credentials"])
        .arg(cluster.name.as_str())
        .arg(cluster.location.flag())
        .arg(cluster.location.name())
        .arg("--project")
        .arg(cluster.project.as_str())
}

/// `kubectl config rename-context <generated> <context>` against the same kubeconfig
pub fn rename_context(settings: &Settings, cluster: &ClusterSpec) -> Invocation {
    let kubeconfig = settings.kubeconfig_path(&cluster.context);

    Invocation::new(&settings.kubectl_bin)
        .env(kubectl::KUBECONFIG_ENV, kubeconfig.to_string_lossy())
        .args(["config", "rename-context"])
        .arg(cluster.generated_context())
        .arg(cluster.context.as_str())
}
