//! Output directory initialization

use log::debug;
use std::fs;
use std::path::Path;

use crate::config::Settings;
use crate::error::{KubeTmuxpError, Result};

/// Create the kubeconfig and tmuxp stores (and their parents) if missing
pub fn ensure_output_dirs(settings: &Settings) -> Result<()> {
    ensure_dir(&settings.kubeconfigs_dir)?;
    ensure_dir(&settings.tmuxp_dir)?;
    Ok(())
}

fn ensure_dir(dir: &Path) -> Result<()> {
    debug!("Ensuring directory {}", dir.display());
    fs::create_dir_all(dir).map_err(|e| {
        KubeTmuxpError::Config(format!(
            "Failed to create directory {}: {}",
            dir.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_nested_dirs() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::with_home(dir.path());
        ensure_output_dirs(&settings).unwrap();
        assert!(dir.path().join(".kube").join("configs").is_dir());
        assert!(dir.path().join(".tmuxp").is_dir());
    }

    #[test]
    fn test_idempotent() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::with_home(dir.path());
        ensure_output_dirs(&settings).unwrap();
        fs::write(settings.kubeconfig_path("ctx"), "keep").unwrap();
        ensure_output_dirs(&settings).unwrap();
        assert_eq!(
            fs::read_to_string(settings.kubeconfig_path("ctx")).unwrap(),
            "keep"
        );
    }

    #[test]
    fn test_fails_when_path_is_a_file() {
        let dir = TempDir::new().unwrap();
        let mut settings = Settings::with_home(dir.path());
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        settings.tmuxp_dir = blocker.join("tmuxp");

        let err = ensure_output_dirs(&settings).unwrap_err();
        assert!(err.to_string().contains("Failed to create directory"));
    }
}
