//! Per-cluster context lifecycle: delete stale kubeconfig, fetch, rename

use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::Settings;
use crate::error::{KubeTmuxpError, Result};
use crate::manifest::ClusterSpec;

use super::commands::{fetch_credentials, rename_context};
use super::invocation::{CommandRunner, Invocation};

/// Remove a kubeconfig file. A missing file is not an error.
///
/// Returns whether a file was actually removed.
pub fn delete_credentials(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No stale kubeconfig at {}", path.display());
            Ok(false)
        }
        Err(e) => Err(KubeTmuxpError::CredentialsDelete {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Drives gcloud and kubectl for one cluster at a time
pub struct ContextDriver<'a, R: CommandRunner> {
    settings: &'a Settings,
    runner: R,
}

impl<'a, R: CommandRunner> ContextDriver<'a, R> {
    pub fn new(settings: &'a Settings, runner: R) -> Self {
        Self { settings, runner }
    }

    /// Recreate the cluster's kubeconfig and give its context the manifest alias.
    ///
    /// Between the delete and a successful fetch the kubeconfig does not exist;
    /// an interrupted run leaves it that way until the next run.
    pub fn provision(&mut self, cluster: &ClusterSpec) -> Result<()> {
        let kubeconfig = self.settings.kubeconfig_path(&cluster.context);

        if self.settings.dry_run {
            println!("Would remove: {}", kubeconfig.display());
        } else {
            println!("Removing: {}", kubeconfig.display());
            delete_credentials(&kubeconfig)?;
        }

        self.execute(&fetch_credentials(self.settings, cluster))?;
        self.execute(&rename_context(self.settings, cluster))?;
        Ok(())
    }

    fn execute(&mut self, invocation: &Invocation) -> Result<()> {
        println!("Executing command: {}", invocation);
        self.runner.run(invocation)
    }

    /// Give back the runner (tests inspect what was recorded)
    pub fn into_runner(self) -> R {
        self.runner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kube::testing::RecordingRunner;
    use crate::manifest::Location;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn settings(dir: &TempDir) -> Settings {
        let mut settings = Settings::with_home(dir.path());
        fs::create_dir_all(&settings.kubeconfigs_dir).unwrap();
        settings.tmuxp_dir = dir.path().join("tmuxp");
        settings
    }

    fn cluster() -> ClusterSpec {
        ClusterSpec {
            project: "proj1".to_string(),
            name: "c1".to_string(),
            context: "ctx1".to_string(),
            location: Location::Zonal("us-central1-a".to_string()),
            extra_envs: BTreeMap::new(),
        }
    }

    #[test]
    fn test_delete_missing_file_is_ok() {
        let dir = TempDir::new().unwrap();
        let removed = delete_credentials(&dir.path().join("absent")).unwrap();
        assert!(!removed);
    }

    #[test]
    fn test_delete_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ctx");
        fs::write(&path, "stale").unwrap();
        assert!(delete_credentials(&path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_delete_other_errors_propagate() {
        // remove_file on a directory fails with something other than NotFound
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ctx");
        fs::create_dir(&path).unwrap();
        match delete_credentials(&path) {
            Err(KubeTmuxpError::CredentialsDelete { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected CredentialsDelete, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_permission_denied_propagates() {
        use std::os::unix::fs::{MetadataExt, PermissionsExt};

        let dir = TempDir::new().unwrap();
        let configs = dir.path().join("configs");
        fs::create_dir(&configs).unwrap();
        let path = configs.join("ctx");
        fs::write(&path, "stale").unwrap();

        // root ignores directory permissions
        if fs::metadata(&path).unwrap().uid() == 0 {
            return;
        }

        fs::set_permissions(&configs, fs::Permissions::from_mode(0o555)).unwrap();
        let result = delete_credentials(&path);
        fs::set_permissions(&configs, fs::Permissions::from_mode(0o755)).unwrap();

        match result {
            Err(KubeTmuxpError::CredentialsDelete { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), ErrorKind::PermissionDenied);
            }
            other => panic!("Expected CredentialsDelete, got {:?}", other),
        }
        assert!(path.exists());
    }

    #[test]
    fn test_provision_deletes_then_fetches_then_renames() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);
        let kubeconfig = settings.kubeconfig_path("ctx1");
        fs::write(&kubeconfig, "stale").unwrap();

        let mut driver = ContextDriver::new(&settings, RecordingRunner::default());
        driver.provision(&cluster()).unwrap();

        assert!(!kubeconfig.exists());
        let runner = driver.into_runner();
        assert_eq!(runner.invocations.len(), 2);
        assert_eq!(runner.invocations[0].program, "gcloud");
        assert_eq!(runner.invocations[1].program, "kubectl");
        assert_eq!(
            runner.invocations[1].args[2..],
            ["gke_proj1_us-central1-a_c1", "ctx1"]
        );
    }

    #[test]
    fn test_provision_stops_after_failed_fetch() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);

        let mut driver = ContextDriver::new(&settings, RecordingRunner::failing_on("gcloud"));
        let result = driver.provision(&cluster());

        assert!(matches!(result, Err(KubeTmuxpError::Command { .. })));
        let runner = driver.into_runner();
        assert_eq!(runner.invocations.len(), 1);
        assert_eq!(runner.invocations[0].program, "gcloud");
    }

    #[test]
    fn test_provision_dry_run_keeps_file() {
        let dir = TempDir::new().unwrap();
        let mut settings = settings(&dir);
        settings.dry_run = true;
        let kubeconfig = settings.kubeconfig_path("ctx1");
        fs::write(&kubeconfig, "current").unwrap();

        let mut driver = ContextDriver::new(&settings, RecordingRunner::default());
        driver.provision(&cluster()).unwrap();

        assert!(kubeconfig.exists());
        assert_eq!(driver.into_runner().invocations.len(), 2);
    }
}
