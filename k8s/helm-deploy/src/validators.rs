use crate::{
    common::{
        constants::CHART_YAML,
        error::{
            ChartNameMismatch, HelmVersionCommand, InvalidGitRef, InvalidReleaseName,
            NotADirectory, NotAFile, RegexCompile, Result, ValidateDirPath, ValidateFilePath,
        },
    },
    helm::{
        chart::{chart_location, Chart},
        client::HelmClient,
    },
    runner::CommandRunner,
    vec_to_strings,
};
use regex::Regex;
use snafu::{ensure, ResultExt};
use std::{fs, path::Path};
use tracing::debug;

/// Validate that the helm binary can be executed, by running `helm version --client --short`.
/// Returns the client version string.
pub fn validate_helm_in_path<R>(helm: &HelmClient<R>) -> Result<String>
where
    R: CommandRunner,
{
    let invocation = helm.helm_invocation(vec_to_strings!["version", "--client", "--short"]);
    let output = helm.run(&invocation)?;
    ensure!(
        output.success(),
        HelmVersionCommand {
            command: invocation.program(),
            args: invocation.args().to_vec(),
            std_err: output.stderr_string()?
        }
    );

    let version = output.stdout_str()?.trim().to_string();
    debug!(helm = helm.helm_binary(), %version, "Found helm");
    Ok(version)
}

/// Validate the input helm chart directory path:
/// - validate if the path exists and is a directory.
/// - validate if the Chart.yaml file is present and parses.
/// - validate if the chart name in Chart.yaml is the name of the resolved directory, as the
///   published key is named after the directory and helm names the archive after Chart.yaml.
pub fn validate_chart_dir(dir_path: &Path) -> Result<()> {
    let is_dir = fs::metadata(dir_path)
        .map(|m| m.is_dir())
        .context(ValidateDirPath { path: dir_path })?;
    ensure!(is_dir, NotADirectory { path: dir_path });

    let chart_yaml_path = dir_path.join(CHART_YAML);
    let is_file = fs::metadata(chart_yaml_path.as_path())
        .map(|m| m.is_file())
        .context(ValidateFilePath {
            path: chart_yaml_path.clone(),
        })?;
    ensure!(
        is_file,
        NotAFile {
            path: chart_yaml_path
        }
    );

    let (_, dir_name) = chart_location(dir_path)?;

    let chart = Chart::from_chart_dir(dir_path)?;
    ensure!(
        chart.name() == dir_name,
        ChartNameMismatch {
            path: dir_path,
            chart_name: chart.name(),
            dir_name
        }
    );

    Ok(())
}

/// Validate that the release name is a DNS-1123 label, which is what helm accepts.
pub fn validate_release_name(name: &str) -> Result<()> {
    let expression = r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$";
    let regex = Regex::new(expression).context(RegexCompile { expression })?;

    ensure!(
        name.len() <= 53 && regex.is_match(name),
        InvalidReleaseName { name }
    );
    Ok(())
}

/// Validate that the git ref can be used as a single segment of an object key.
pub fn validate_git_ref(git_ref: &str) -> Result<()> {
    ensure!(
        !git_ref.is_empty()
            && !git_ref.contains('/')
            && git_ref != "."
            && git_ref != ".."
            && !git_ref.chars().any(char::is_whitespace),
        InvalidGitRef { git_ref }
    );
    Ok(())
}
