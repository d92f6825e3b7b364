//! External command execution

use log::debug;
use std::fmt;
use std::process::Command;

use crate::error::{KubeTmuxpError, Result};

/// A fully described external command: program, argv and extra environment.
///
/// Arguments are passed to the process as-is, never through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
}

impl Invocation {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Value of an extra environment variable, if set
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.envs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Renders like the equivalent shell line, e.g. `KUBECONFIG=/x kubectl config ...`
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.envs {
            write!(f, "{}={} ", key, quote(value))?;
        }
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,@+".contains(c));
    if plain {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

/// Runs external commands on behalf of the context driver
pub trait CommandRunner {
    /// Run the invocation to completion; any non-zero exit is an error
    fn run(&mut self, invocation: &Invocation) -> Result<()>;
}

/// Spawns real processes, inheriting stdin/stdout/stderr
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        debug!(
            "Spawning {} with args {:?} and extra env {:?}",
            invocation.program, invocation.args, invocation.envs
        );

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(invocation.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .status()
            .map_err(|e| KubeTmuxpError::Command {
                command: invocation.to_string(),
                message: format!("failed to execute {}: {}", invocation.program, e),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(KubeTmuxpError::Command {
                command: invocation.to_string(),
                message: format!("command failed with {}", status),
            })
        }
    }
}

/// Accepts every invocation without running it
#[derive(Debug, Default)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        debug!("Dry run, not executing: {}", invocation);
        Ok(())
    }
}
