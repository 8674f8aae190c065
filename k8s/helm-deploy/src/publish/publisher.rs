use crate::{
    common::{
        constants::CHART_VERSION,
        error::{ExtractArchiveCommand, HelmInitCommand, HelmPackageCommand, Result},
        file::remove_file_if_exists,
    },
    helm::{
        chart::{chart_location, Chart},
        client::HelmClient,
    },
    publish::{
        bucket::PublishRules,
        key::{local_package_name, package_dir_prefix, package_key, package_suffix},
    },
    runner::CommandRunner,
    vec_to_strings,
};
use snafu::ensure;
use std::path::Path;
use tracing::{error, info};

impl<R> HelmClient<R>
where
    R: CommandRunner,
{
    /// Runs command `helm init --client-only`. The local helm home must be initialized before
    /// charts can be packaged.
    pub fn init(&self) -> Result<()> {
        let invocation = self.helm_invocation(vec_to_strings!["init", "--client-only"]);
        let output = self.run(&invocation)?;
        ensure!(
            output.success(),
            HelmInitCommand {
                command: invocation.program(),
                args: invocation.args().to_vec(),
                std_err: output.stderr_string()?
            }
        );
        Ok(())
    }

    /// Packages the chart at `chart_path` and uploads it to the bucket, under a key derived from
    /// the project, the chart directory's name and the git ref. The local archive is removed
    /// whether or not the upload succeeded. Returns the key.
    pub async fn publish<P>(
        &self,
        project_name: &str,
        rules: &PublishRules,
        chart_path: P,
        git_ref: &str,
    ) -> Result<String>
    where
        P: AsRef<Path>,
    {
        let (charts_dir, dir_name) = chart_location(chart_path.as_ref())?;
        let chart = Chart::from_chart_dir(charts_dir.join(&dir_name))?;

        info!(
            chart = chart.name(),
            version = chart.version().unwrap_or("unset"),
            packaged_version = CHART_VERSION,
            "Building package"
        );
        self.init()?;

        let invocation = self
            .helm_invocation(vec_to_strings![
                "package",
                "--version",
                CHART_VERSION,
                dir_name
            ])
            .in_dir(&charts_dir);
        let output = self.run(&invocation)?;
        ensure!(
            output.success(),
            HelmPackageCommand {
                command: invocation.program(),
                args: invocation.args().to_vec(),
                std_err: output.stderr_string()?
            }
        );

        // helm names the archive after Chart.yaml, not the directory.
        let package_path = charts_dir.join(local_package_name(chart.name()));
        let bucket_path = package_key(project_name, &dir_name, git_ref);

        info!(chart = %dir_name, key = %bucket_path, "Uploading chart");
        let uploaded = rules.bucket().upload(&package_path, &bucket_path).await;
        let removed = remove_file_if_exists(&package_path);
        uploaded?;
        removed?;

        Ok(bucket_path)
    }

    /// Retrieves every chart published for the project at the git ref, and extracts each of
    /// them into its own sub-directory of `extract_dir`. The first download or extraction
    /// failure stops the pull. Returns the keys of the extracted archives.
    pub async fn pull_packages<P>(
        &self,
        project_name: &str,
        rules: &PublishRules,
        git_ref: &str,
        extract_dir: P,
    ) -> Result<Vec<String>>
    where
        P: AsRef<Path>,
    {
        let extract_dir = extract_dir.as_ref();
        let suffix = package_suffix(git_ref);

        // List the contents of the publish "directory" and find everything that looks like a
        // chart.
        let package_keys: Vec<String> = rules
            .bucket()
            .list(&package_dir_prefix(project_name, git_ref))
            .await?
            .into_iter()
            .filter(|key| key.ends_with(suffix.as_str()))
            .collect();

        for package_key in &package_keys {
            let file_name = package_key.rsplit('/').next().unwrap_or(package_key.as_str());
            let downloaded_package = extract_dir.join(file_name);

            let fetched = self
                .fetch_package(rules, package_key, &downloaded_package, extract_dir)
                .await;
            let removed = remove_file_if_exists(&downloaded_package);
            fetched?;
            removed?;

            info!(key = %package_key, dir = %extract_dir.display(), "Extracted chart");
        }

        Ok(package_keys)
    }

    async fn fetch_package(
        &self,
        rules: &PublishRules,
        package_key: &str,
        downloaded_package: &Path,
        extract_dir: &Path,
    ) -> Result<()> {
        if let Err(error) = rules
            .bucket()
            .download(package_key, downloaded_package)
            .await
        {
            error!(key = %package_key, %error, "Error downloading chart archive");
            return Err(error);
        }

        self.extract_archive(downloaded_package, extract_dir)
    }

    /// Runs command `tar -xzf <archive> -C <extract_dir>`.
    pub fn extract_archive(&self, archive: &Path, extract_dir: &Path) -> Result<()> {
        let invocation = self.tar_invocation(vec_to_strings![
            "-xzf",
            archive.to_string_lossy(),
            "-C",
            extract_dir.to_string_lossy()
        ]);
        let output = self.run(&invocation)?;
        ensure!(
            output.success(),
            ExtractArchiveCommand {
                archive,
                command: invocation.program(),
                args: invocation.args().to_vec(),
                std_err: output.stderr_string()?
            }
        );
        Ok(())
    }
}
