use crate::opts::{CliArgs, Operation};
use helm_deploy::{
    find_values,
    validators::{
        validate_chart_dir, validate_git_ref, validate_helm_in_path, validate_release_name,
    },
    HelmClient, ObjectStoreBucket, PublishRules, ReleaseRules, Result,
};
use std::sync::Arc;
use tracing::info;

/// Validates the inputs of the requested operation, then runs it.
pub(crate) async fn execute(opts: &CliArgs) -> Result<()> {
    let mut builder = HelmClient::builder().with_helm_binary(opts.helm_bin());
    if let Some(helm_home) = opts.helm_home() {
        builder = builder.with_helm_home(helm_home);
    }
    let helm = builder.build();

    match opts.operation() {
        Operation::Publish {
            project,
            chart_path,
            git_ref,
        } => {
            validate_git_ref(git_ref)?;
            validate_chart_dir(chart_path)?;
            validate_helm_in_path(&helm)?;

            let rules = publish_rules(opts)?;
            let key = helm
                .publish(project, &rules, chart_path, git_ref)
                .await?;
            console_logger::result("Published chart", key.as_str());
        }
        Operation::Pull {
            project,
            git_ref,
            dest_dir,
        } => {
            validate_git_ref(git_ref)?;

            let rules = publish_rules(opts)?;
            let keys = helm
                .pull_packages(project, &rules, git_ref, dest_dir)
                .await?;
            console_logger::list(
                &format!("Extracted charts into {}", dest_dir.display()),
                keys,
            );
        }
        Operation::Values {
            chart_path,
            cluster,
            namespace,
        } => {
            let values = find_values(chart_path, cluster, namespace);
            console_logger::list(
                "Values files, in increasing priority",
                values.iter().map(|path| path.display().to_string()),
            );
        }
        Operation::Exists { release_name } => {
            validate_release_name(release_name)?;
            validate_helm_in_path(&helm)?;

            let exists = helm.release_exists(release_name)?;
            console_logger::result(release_name, if exists { "exists" } else { "not found" });
        }
        Operation::Start { install, force } => {
            validate_release_name(&install.release_name)?;
            validate_chart_dir(&install.chart_path)?;
            validate_helm_in_path(&helm)?;

            helm.start(
                &ReleaseRules::new(&install.release_name),
                &install.chart_path,
                &install.cluster,
                &install.namespace,
                *force,
                &install.helm_args,
                &install.overrides(),
            )?;
            console_logger::result("Installed release", &install.release_name);
        }
        Operation::DryRun { install } => {
            validate_release_name(&install.release_name)?;
            validate_chart_dir(&install.chart_path)?;
            validate_helm_in_path(&helm)?;

            helm.dry_run(
                &ReleaseRules::new(&install.release_name),
                &install.chart_path,
                &install.cluster,
                &install.namespace,
                &install.helm_args,
                &install.overrides(),
            )?;
            console_logger::result("Dry run succeeded for release", &install.release_name);
        }
        Operation::Stop { release_name } => {
            validate_release_name(release_name)?;
            validate_helm_in_path(&helm)?;

            if helm.stop(&ReleaseRules::new(release_name))? {
                console_logger::result("Removed release", release_name);
            } else {
                console_logger::warn("Nothing to remove", &format!("{release_name} doesn't exist"));
            }
        }
        Operation::Rollback {
            release_name,
            revision,
            relative,
        } => {
            validate_release_name(release_name)?;
            validate_helm_in_path(&helm)?;

            let rules = ReleaseRules::new(release_name);
            let rolled_back_to = match revision {
                Some(revision) => {
                    helm.rollback(&rules, *revision)?;
                    Some(*revision)
                }
                None => helm.rollback_relative(&rules, *relative)?,
            };
            match rolled_back_to {
                Some(revision) => console_logger::result(
                    &format!("Rolled back {release_name} to revision"),
                    &revision.to_string(),
                ),
                None => console_logger::warn(
                    "Nothing rolled back",
                    &format!("{release_name} has fewer than {relative} earlier revisions"),
                ),
            }
        }
    }

    info!("Done");
    Ok(())
}

/// Builds the bucket from the storage options.
fn publish_rules(opts: &CliArgs) -> Result<PublishRules> {
    let bucket = ObjectStoreBucket::new(&opts.storage_config())?;
    Ok(PublishRules::new(Arc::new(bucket)))
}
