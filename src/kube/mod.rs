//! Kubeconfig context provisioning through gcloud and kubectl

mod commands;
mod invocation;
mod lifecycle;

pub use commands::{fetch_credentials, rename_context};
pub use invocation::{CommandRunner, DryRunRunner, Invocation, SystemRunner};
pub use lifecycle::{delete_credentials, ContextDriver};

#[cfg(test)]
pub(crate) mod testing {
    use super::{CommandRunner, Invocation};
    use crate::error::{KubeTmuxpError, Result};

    /// Records invocations; fails those whose program matches `fail_program`
    #[derive(Debug, Default)]
    pub struct RecordingRunner {
        pub invocations: Vec<Invocation>,
        pub fail_program: Option<String>,
        /// Only fail for invocations scoped to this context's kubeconfig
        pub fail_context: Option<String>,
    }

    impl RecordingRunner {
        pub fn failing_on(program: &str) -> Self {
            Self {
                fail_program: Some(program.to_string()),
                ..Default::default()
            }
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&mut self, invocation: &Invocation) -> Result<()> {
            self.invocations.push(invocation.clone());

            let program_matches = self.fail_program.as_deref() == Some(invocation.program.as_str());
            let context_matches = match &self.fail_context {
                Some(ctx) => invocation
                    .env_value("KUBECONFIG")
                    .is_some_and(|path| path.ends_with(ctx.as_str())),
                None => true,
            };

            if program_matches && context_matches {
                Err(KubeTmuxpError::Command {
                    command: invocation.to_string(),
                    message: "command failed with exit status: 1".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }
}
