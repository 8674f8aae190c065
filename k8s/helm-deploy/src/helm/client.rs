use crate::{
    common::{
        constants::{HELM_BINARY, HELM_HOME_ENV, TAR_BINARY},
        error::Result,
    },
    runner::{CommandOutput, CommandRunner, Invocation, SystemRunner},
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Describes the release a controller operation acts upon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRules {
    release_name: String,
}

impl ReleaseRules {
    pub fn new<N>(release_name: N) -> Self
    where
        N: ToString,
    {
        Self {
            release_name: release_name.to_string(),
        }
    }

    /// This is a getter for the helm release name.
    pub fn release_name(&self) -> &str {
        self.release_name.as_str()
    }
}

/// This is a builder for HelmClient.
#[derive(Default)]
pub struct HelmClientBuilder {
    helm_binary: Option<String>,
    tar_binary: Option<String>,
    helm_home: Option<PathBuf>,
}

impl HelmClientBuilder {
    /// Use this helm binary instead of the one in $PATH.
    #[must_use]
    pub fn with_helm_binary<B>(mut self, binary: B) -> Self
    where
        B: ToString,
    {
        self.helm_binary = Some(binary.to_string());
        self
    }

    /// Use this tar binary instead of the one in $PATH.
    #[must_use]
    pub fn with_tar_binary<B>(mut self, binary: B) -> Self
    where
        B: ToString,
    {
        self.tar_binary = Some(binary.to_string());
        self
    }

    /// Export HELM_HOME to every helm command. Helm falls back to ~/.helm when unset.
    #[must_use]
    pub fn with_helm_home<P>(mut self, helm_home: P) -> Self
    where
        P: AsRef<Path>,
    {
        self.helm_home = Some(helm_home.as_ref().to_path_buf());
        self
    }

    /// Build a HelmClient which spawns child processes.
    pub fn build(self) -> HelmClient<SystemRunner> {
        self.build_with_runner(SystemRunner)
    }

    /// Build a HelmClient which executes commands through `runner`.
    pub fn build_with_runner<R>(self, runner: R) -> HelmClient<R>
    where
        R: CommandRunner,
    {
        HelmClient {
            runner,
            helm_binary: self.helm_binary.unwrap_or_else(|| HELM_BINARY.to_string()),
            tar_binary: self.tar_binary.unwrap_or_else(|| TAR_BINARY.to_string()),
            helm_home: self.helm_home,
        }
    }
}

/// This type has functions which execute helm commands to publish, fetch, install and roll
/// back charts and releases.
pub struct HelmClient<R> {
    runner: R,
    helm_binary: String,
    tar_binary: String,
    helm_home: Option<PathBuf>,
}

impl HelmClient<SystemRunner> {
    /// This creates an empty builder.
    pub fn builder() -> HelmClientBuilder {
        HelmClientBuilder::default()
    }
}

impl<R> HelmClient<R>
where
    R: CommandRunner,
{
    /// This is a getter for the helm binary in use.
    pub fn helm_binary(&self) -> &str {
        self.helm_binary.as_str()
    }

    #[cfg(test)]
    pub(crate) fn runner(&self) -> &R {
        &self.runner
    }

    /// Builds a helm invocation, carrying HELM_HOME if one is configured.
    pub(crate) fn helm_invocation(&self, args: Vec<String>) -> Invocation {
        let invocation = Invocation::new(self.helm_binary.as_str(), args);
        match self.helm_home.as_ref() {
            Some(home) => invocation.with_env(HELM_HOME_ENV, home.to_string_lossy()),
            None => invocation,
        }
    }

    /// Builds a tar invocation.
    pub(crate) fn tar_invocation(&self, args: Vec<String>) -> Invocation {
        Invocation::new(self.tar_binary.as_str(), args)
    }

    /// Runs the command and logs its standard output.
    pub(crate) fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let command = invocation.program();
        let args = invocation.args();
        debug!(%command, ?args, "Running command");

        let output = self.runner.run(invocation)?;

        if !invocation.discards_output() {
            debug!(
                stdout = %String::from_utf8_lossy(output.stdout.as_slice()),
                code = ?output.code,
                "Command standard output"
            );
        }
        Ok(output)
    }
}
