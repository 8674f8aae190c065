use crate::{
    common::error::{
        HelmDeleteCommand, HelmListCommand, HelmRollbackCommand, HelmUpgradeCommand, Result,
    },
    helm::{
        client::{HelmClient, ReleaseRules},
        list::parse_revision,
        overrides::ValueOverrides,
        values::find_values,
    },
    runner::CommandRunner,
    vec_to_strings,
};
use snafu::ensure;
use std::path::Path;
use tracing::{info, warn};

impl<R> HelmClient<R>
where
    R: CommandRunner,
{
    /// Runs command `helm status <release_name>`. The release exists if and only if the command
    /// exits with 0; any other exit code means it does not.
    pub fn release_exists(&self, release_name: &str) -> Result<bool> {
        let invocation = self
            .helm_invocation(vec_to_strings!["status", release_name])
            .quiet();
        let output = self.run(&invocation)?;
        Ok(output.success())
    }

    /// Installs or upgrades the release with `helm upgrade --install`.
    #[allow(clippy::too_many_arguments)]
    pub fn start<P>(
        &self,
        rules: &ReleaseRules,
        chart_path: P,
        cluster_name: &str,
        namespace: &str,
        force: bool,
        extra_args: &[String],
        overrides: &ValueOverrides,
    ) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let mut helm_args = extra_args.to_vec();
        if force {
            helm_args.push("--force".to_string());
        }
        info!(
            release = rules.release_name(),
            namespace, "Installing release"
        );
        self.upgrade_install(
            rules,
            chart_path.as_ref(),
            cluster_name,
            namespace,
            helm_args,
            overrides,
        )
    }

    /// Same as start, but helm only renders and validates the release.
    pub fn dry_run<P>(
        &self,
        rules: &ReleaseRules,
        chart_path: P,
        cluster_name: &str,
        namespace: &str,
        extra_args: &[String],
        overrides: &ValueOverrides,
    ) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let mut helm_args = extra_args.to_vec();
        helm_args.extend(vec_to_strings!["--dry-run", "--debug"]);
        info!(
            release = rules.release_name(),
            namespace, "Dry run installing release"
        );
        self.upgrade_install(
            rules,
            chart_path.as_ref(),
            cluster_name,
            namespace,
            helm_args,
            overrides,
        )
    }

    /// Runs command `helm upgrade <release_name> <chart_path> --install --namespace=<namespace>`
    /// with the values files for the cluster and namespace, then the overrides, then `helm_args`.
    fn upgrade_install(
        &self,
        rules: &ReleaseRules,
        chart_path: &Path,
        cluster_name: &str,
        namespace: &str,
        helm_args: Vec<String>,
        overrides: &ValueOverrides,
    ) -> Result<()> {
        let mut args: Vec<String> = vec_to_strings![
            "upgrade",
            rules.release_name(),
            chart_path.to_string_lossy(),
            "--install",
            format!("--namespace={namespace}")
        ];

        for path in find_values(chart_path, cluster_name, namespace) {
            args.push(format!("--values={}", path.display()));
        }

        args.extend(overrides.to_args());

        // Extra args
        args.extend(helm_args);

        let invocation = self.helm_invocation(args);
        info!(command = %invocation.args().join(" "), "Executing helm");
        let output = self.run(&invocation)?;
        ensure!(
            output.success(),
            HelmUpgradeCommand {
                command: invocation.program(),
                args: invocation.args().to_vec(),
                std_err: output.stderr_string()?
            }
        );

        Ok(())
    }

    /// Runs command `helm delete --purge <release_name>` if the release exists. A missing
    /// release is not an error. Returns whether a release was removed.
    pub fn stop(&self, rules: &ReleaseRules) -> Result<bool> {
        let release_name = rules.release_name();

        if !self.release_exists(release_name)? {
            warn!(
                release = release_name,
                "Could not remove release because it doesn't exist"
            );
            return Ok(false);
        }

        let invocation = self.helm_invocation(vec_to_strings!["delete", "--purge", release_name]);
        let output = self.run(&invocation)?;
        ensure!(
            output.success(),
            HelmDeleteCommand {
                command: invocation.program(),
                args: invocation.args().to_vec(),
                std_err: output.stderr_string()?
            }
        );

        info!(release = release_name, "Successfully removed release");
        Ok(true)
    }

    /// Runs command `helm rollback <release_name> <revision>`.
    pub fn rollback(&self, rules: &ReleaseRules, revision: u64) -> Result<()> {
        let invocation = self.helm_invocation(vec_to_strings![
            "rollback",
            rules.release_name(),
            revision
        ]);
        let output = self.run(&invocation)?;
        ensure!(
            output.success(),
            HelmRollbackCommand {
                command: invocation.program(),
                args: invocation.args().to_vec(),
                std_err: output.stderr_string()?
            }
        );

        info!(
            release = rules.release_name(),
            revision, "Rolled back release"
        );
        Ok(())
    }

    /// Rolls the release back by `num_versions` revisions. Going back past the first revision
    /// is refused with a warning, and nothing is rolled back. Returns the revision rolled back
    /// to, if any.
    pub fn rollback_relative(
        &self,
        rules: &ReleaseRules,
        num_versions: u64,
    ) -> Result<Option<u64>> {
        let current_revision = self.current_revision(rules.release_name())?;

        if num_versions > current_revision {
            warn!(
                release = rules.release_name(),
                current_revision, num_versions, "Can't rollback that far"
            );
            return Ok(None);
        }

        let revision = current_revision - num_versions;
        self.rollback(rules, revision)?;
        Ok(Some(revision))
    }

    /// Reads the current revision of the release from `helm list`.
    pub fn current_revision(&self, release_name: &str) -> Result<u64> {
        let invocation = self.helm_invocation(vec_to_strings!["list"]);
        let output = self.run(&invocation)?;
        ensure!(
            output.success(),
            HelmListCommand {
                command: invocation.program(),
                args: invocation.args().to_vec(),
                std_err: output.stderr_string()?
            }
        );

        parse_revision(output.stdout_str()?, release_name)
    }
}
