//! Manifest processing: load, prepare, then provision each cluster in order

use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::Result;
use crate::kube::{CommandRunner, ContextDriver, DryRunRunner, SystemRunner};
use crate::manifest::{load_manifest, ClusterSpec};
use crate::tmuxp::{write_session, SessionRenderer};
use crate::workspace::ensure_output_dirs;

/// Result of processing one cluster entry
#[derive(Debug, Clone)]
pub struct ClusterOutcome {
    pub project: String,
    pub cluster: String,
    pub context: String,
    pub mode: &'static str,
    pub session_path: PathBuf,
    /// `None` when the cluster was provisioned
    pub error: Option<String>,
}

impl ClusterOutcome {
    fn new(settings: &Settings, cluster: &ClusterSpec, error: Option<String>) -> Self {
        Self {
            project: cluster.project.clone(),
            cluster: cluster.name.clone(),
            context: cluster.context.clone(),
            mode: cluster.location.mode(),
            session_path: settings.session_path(&cluster.context),
            error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcomes of a whole run, in manifest order
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<ClusterOutcome>,
}

impl RunSummary {
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }
}

/// Full run for a manifest file.
///
/// The manifest and the template are checked before anything on disk changes.
pub fn run_manifest(settings: &Settings, manifest: &Path) -> Result<RunSummary> {
    let clusters = load_manifest(manifest)?;
    let renderer = SessionRenderer::from_file(&settings.template_path())?;

    if settings.dry_run {
        info!("Dry run: no commands will be executed and no files written");
        process_clusters(settings, &clusters, &renderer, DryRunRunner)
    } else {
        ensure_output_dirs(settings)?;
        process_clusters(settings, &clusters, &renderer, SystemRunner)
    }
}

/// Provision every cluster in order.
///
/// Stops at the first failure unless `keep_going` is set, in which case the
/// failure is recorded and the next cluster is processed.
pub fn process_clusters<R: CommandRunner>(
    settings: &Settings,
    clusters: &[ClusterSpec],
    renderer: &SessionRenderer,
    runner: R,
) -> Result<RunSummary> {
    let mut driver = ContextDriver::new(settings, runner);
    let mut summary = RunSummary::default();

    for cluster in clusters {
        match process_cluster(settings, &mut driver, renderer, cluster) {
            Ok(()) => summary
                .outcomes
                .push(ClusterOutcome::new(settings, cluster, None)),
            Err(e) if settings.keep_going => {
                eprintln!("Error: {}", e);
                debug!("Continuing after failure of cluster '{}'", cluster.name);
                summary
                    .outcomes
                    .push(ClusterOutcome::new(settings, cluster, Some(e.to_string())));
            }
            Err(e) => return Err(e),
        }
    }

    debug!(
        "Processed {} cluster(s), {} failed",
        summary.outcomes.len(),
        summary.failed_count()
    );
    Ok(summary)
}

fn process_cluster<R: CommandRunner>(
    settings: &Settings,
    driver: &mut ContextDriver<'_, R>,
    renderer: &SessionRenderer,
    cluster: &ClusterSpec,
) -> Result<()> {
    println!("\n>>>>> Running for cluster: {}\n", cluster.name);
    debug!(
        "Cluster '{}' in project '{}' at {}",
        cluster.name, cluster.project, cluster.location
    );

    driver.provision(cluster)?;

    let kubeconfig = settings.kubeconfig_path(&cluster.context);
    let session = renderer.render(&kubeconfig, &cluster.context, &cluster.extra_envs)?;
    let session_path = settings.session_path(&cluster.context);

    if settings.dry_run {
        println!("\nWould generate tmuxp config: {}", session_path.display());
        debug!("Rendered session for '{}':\n{}", cluster.context, session);
    } else {
        write_session(&session_path, &session)?;
        println!("\ntmuxp config generated: {}", session_path.display());
    }
    Ok(())
}
