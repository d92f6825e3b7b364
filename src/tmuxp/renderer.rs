//! tmuxp session rendering

use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tera::{Context, Tera};

use crate::config::template;
use crate::error::{KubeTmuxpError, Result};

/// Renders the session template for each context
pub struct SessionRenderer {
    tera: Tera,
}

impl SessionRenderer {
    /// Load and compile the template file once for the whole run
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading session template from {}", path.display());

        if !path.is_file() {
            return Err(KubeTmuxpError::Template(format!(
                "template not found at {}",
                path.display()
            )));
        }

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_template_file(path, Some(template::FILE_NAME))?;
        Ok(Self { tera })
    }

    /// Compile a template from a string
    pub fn from_source(source: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(template::FILE_NAME, source)?;
        Ok(Self { tera })
    }

    /// Render with `kubeconfig`, `session_name` and `extra_envs` bound
    pub fn render(
        &self,
        kubeconfig: &Path,
        session_name: &str,
        extra_envs: &BTreeMap<String, String>,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("kubeconfig", &kubeconfig.to_string_lossy());
        context.insert("session_name", session_name);
        context.insert("extra_envs", extra_envs);

        Ok(self.tera.render(template::FILE_NAME, &context)?)
    }
}

/// Write a rendered session, replacing any previous file
pub fn write_session(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| {
        KubeTmuxpError::Template(format!("failed to write {}: {}", path.display(), e))
    })
}
