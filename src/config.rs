//! Configuration constants and run settings

use std::path::{Path, PathBuf};

use log::debug;

use crate::cli::Cli;
use crate::error::{KubeTmuxpError, Result};

/// Default locations of the output stores (relative to HOME)
pub mod paths {
    /// Per-context kubeconfig files
    pub const KUBECONFIGS_DIR: &str = ".kube/configs";

    /// Generated tmuxp session files
    pub const TMUXP_DIR: &str = ".tmuxp";

    /// Template directory, relative to the working directory
    pub const TEMPLATES_DIR: &str = "templates";

    /// Extension of generated session files
    pub const SESSION_EXTENSION: &str = "yaml";
}

/// gcloud invocation details
pub mod gcloud {
    /// Default executable
    pub const BIN: &str = "gcloud";

    /// Context name prefix written by `get-credentials` for GKE clusters
    pub const CONTEXT_PREFIX: &str = "gke";

    /// Environment overrides forcing the v2 API client for regional clusters
    pub const V2_API_ENV: &[(&str, &str)] = &[
        ("CLOUDSDK_CONTAINER_USE_V1_API_CLIENT", "false"),
        ("CLOUDSDK_CONTAINER_USE_V1_API", "false"),
    ];
}

/// kubectl invocation details
pub mod kubectl {
    /// Default executable
    pub const BIN: &str = "kubectl";

    /// Variable scoping every invocation to one kubeconfig file
    pub const KUBECONFIG_ENV: &str = "KUBECONFIG";
}

/// Session template
pub mod template {
    /// Template file name inside the templates directory
    pub const FILE_NAME: &str = "tmuxp-config.yaml.j2";
}

/// Default values for CLI
pub mod defaults {
    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}

/// Settings resolved once at startup and shared by every stage
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding one kubeconfig file per context
    pub kubeconfigs_dir: PathBuf,
    /// Directory holding one tmuxp session file per context
    pub tmuxp_dir: PathBuf,
    /// Directory the session template is loaded from
    pub templates_dir: PathBuf,
    /// gcloud executable
    pub gcloud_bin: String,
    /// kubectl executable
    pub kubectl_bin: String,
    /// Force the v2 API client (beta track) for regional clusters
    pub force_v2_api: bool,
    /// Continue with remaining clusters after a failure
    pub keep_going: bool,
    /// Print what would be done without touching anything
    pub dry_run: bool,
}

impl Settings {
    /// Settings rooted at the given home directory, with all other values defaulted
    pub fn with_home(home: &Path) -> Self {
        Self {
            kubeconfigs_dir: home.join(paths::KUBECONFIGS_DIR),
            tmuxp_dir: home.join(paths::TMUXP_DIR),
            templates_dir: PathBuf::from(paths::TEMPLATES_DIR),
            gcloud_bin: gcloud::BIN.to_string(),
            kubectl_bin: kubectl::BIN.to_string(),
            force_v2_api: true,
            keep_going: false,
            dry_run: false,
        }
    }

    /// Resolve settings from parsed CLI arguments.
    /// HOME is only required when one of the stores is not given explicitly.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let home = match (&cli.kubeconfigs_dir, &cli.tmuxp_dir) {
            (Some(_), Some(_)) => PathBuf::new(),
            _ => dirs::home_dir().ok_or_else(|| {
                KubeTmuxpError::Config(
                    "Could not determine home directory; pass --kubeconfigs-dir and --tmuxp-dir"
                        .to_string(),
                )
            })?,
        };

        let mut settings = Self::with_home(&home);
        if let Some(dir) = &cli.kubeconfigs_dir {
            settings.kubeconfigs_dir = dir.clone();
        }
        if let Some(dir) = &cli.tmuxp_dir {
            settings.tmuxp_dir = dir.clone();
        }
        settings.templates_dir = cli.templates_dir.clone();
        settings.gcloud_bin = cli.gcloud.clone();
        settings.kubectl_bin = cli.kubectl.clone();
        settings.force_v2_api = cli.force_v2_api;
        settings.keep_going = cli.keep_going;
        settings.dry_run = cli.dry_run;

        // Store paths reach KUBECONFIG and the session template as text
        require_utf8(&settings.kubeconfigs_dir, "kubeconfigs directory")?;
        require_utf8(&settings.tmuxp_dir, "tmuxp directory")?;

        debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }

    /// Path of the kubeconfig file owned by `context`
    pub fn kubeconfig_path(&self, context: &str) -> PathBuf {
        self.kubeconfigs_dir.join(context)
    }

    /// Path of the tmuxp session file generated for `context`
    pub fn session_path(&self, context: &str) -> PathBuf {
        self.tmuxp_dir
            .join(format!("{}.{}", context, paths::SESSION_EXTENSION))
    }

    /// Path of the session template
    pub fn template_path(&self) -> PathBuf {
        self.templates_dir.join(template::FILE_NAME)
    }
}

fn require_utf8(path: &Path, what: &str) -> Result<()> {
    if path.to_str().is_none() {
        return Err(KubeTmuxpError::Config(format!(
            "{} {} is not valid UTF-8",
            what,
            path.display()
        )));
    }
    Ok(())
}
