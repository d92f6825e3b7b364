//! CLI argument parsing

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::config::{defaults, gcloud, kubectl, paths};

/// Provision kubectl contexts and tmuxp sessions from a cluster manifest
#[derive(Parser, Debug)]
#[command(name = "kube-tmuxp")]
#[command(version)]
#[command(
    about = "Provision kubectl contexts and tmuxp sessions for GKE clusters",
    long_about = None
)]
#[command(after_help = "EXAMPLES:\n  \
        kube-tmuxp clusters.yaml\n  \
        kube-tmuxp --dry-run clusters.yaml\n  \
        kube-tmuxp --keep-going --format json clusters.yaml")]
pub struct Cli {
    /// Path to the cluster manifest (YAML)
    pub manifest: PathBuf,

    /// Directory for per-context kubeconfig files [default: ~/.kube/configs]
    #[arg(long, env = "KUBE_TMUXP_KUBECONFIGS_DIR")]
    pub kubeconfigs_dir: Option<PathBuf>,

    /// Directory for generated tmuxp session files [default: ~/.tmuxp]
    #[arg(long, env = "KUBE_TMUXP_TMUXP_DIR")]
    pub tmuxp_dir: Option<PathBuf>,

    /// Directory containing the tmuxp-config.yaml.j2 template
    #[arg(long, env = "KUBE_TMUXP_TEMPLATES_DIR", default_value = paths::TEMPLATES_DIR)]
    pub templates_dir: PathBuf,

    /// gcloud executable
    #[arg(long, env = "KUBE_TMUXP_GCLOUD", default_value = gcloud::BIN)]
    pub gcloud: String,

    /// kubectl executable
    #[arg(long, env = "KUBE_TMUXP_KUBECTL", default_value = kubectl::BIN)]
    pub kubectl: String,

    /// Force the v2 API client (gcloud beta) when fetching regional credentials
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub force_v2_api: bool,

    /// Continue with the remaining clusters when one fails
    #[arg(short = 'k', long, default_value_t = false)]
    pub keep_going: bool,

    /// Print the steps without running commands or writing files
    #[arg(short = 'n', long, default_value_t = false)]
    pub dry_run: bool,

    /// Run summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Log level (error, warn, info, debug, trace)
    #[arg(
        short,
        long,
        env = "KUBE_TMUXP_LOG_LEVEL",
        default_value = defaults::LOG_LEVEL
    )]
    pub log_level: String,
}

/// Run summary format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table (default)
    Table,
    /// JSON array
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
