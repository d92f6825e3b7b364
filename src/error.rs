use std::fmt;
use std::path::PathBuf;

/// Errors raised while provisioning contexts and sessions
#[derive(Debug)]
pub enum KubeTmuxpError {
    /// Manifest could not be read or is not valid YAML
    Manifest(String),
    /// Manifest parsed but violates the expected schema
    Validation(String),
    /// Stale credentials file exists but could not be removed
    CredentialsDelete {
        path: PathBuf,
        source: std::io::Error,
    },
    /// External tool could not be launched or exited non-zero
    Command { command: String, message: String },
    /// Session template missing, malformed, or output not writable
    Template(String),
    /// Settings or output directory error
    Config(String),
}

impl fmt::Display for KubeTmuxpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KubeTmuxpError::Manifest(msg) => write!(f, "Failed to load manifest: {}", msg),
            KubeTmuxpError::Validation(msg) => write!(f, "Invalid manifest: {}", msg),
            KubeTmuxpError::CredentialsDelete { path, source } => {
                write!(f, "Failed to remove {}: {}", path.display(), source)
            }
            KubeTmuxpError::Command { command, message } => {
                write!(f, "Command `{}` failed: {}", command, message)
            }
            KubeTmuxpError::Template(msg) => write!(f, "Template error: {}", msg),
            KubeTmuxpError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for KubeTmuxpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KubeTmuxpError::CredentialsDelete { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_yml::Error> for KubeTmuxpError {
    fn from(err: serde_yml::Error) -> Self {
        KubeTmuxpError::Manifest(err.to_string())
    }
}

impl From<tera::Error> for KubeTmuxpError {
    fn from(err: tera::Error) -> Self {
        // tera keeps the useful part (e.g. the offending variable) in the source chain
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = std::error::Error::source(cause);
        }
        KubeTmuxpError::Template(message)
    }
}

/// Result type alias for kube-tmuxp operations
pub type Result<T> = std::result::Result<T, KubeTmuxpError>;
