use clap::{ArgAction, Args, Parser, Subcommand};
use helm_deploy::{
    common::{constants::HELM_BINARY, logging::FmtStyle},
    SetValue, StorageConfig, ValueOverrides,
};
use std::path::PathBuf;

/// These are the supported cli configuration options for helm-deploy.
#[derive(Parser)]
#[command(name = "helm-deploy", version)]
#[command(about = "Publishes, fetches, installs and rolls back Helm charts", long_about = None)]
pub(crate) struct CliArgs {
    /// The operation to run.
    #[command(subcommand)]
    operation: Operation,

    /// Formatting style to be used while logging.
    #[arg(global = true, long, value_enum, default_value_t = FmtStyle::Pretty)]
    fmt_style: FmtStyle,

    /// Use ANSI colors for the logs.
    #[arg(global = true, long, default_value_t = true, action = ArgAction::Set)]
    ansi_colors: bool,

    /// The helm binary to run.
    #[arg(global = true, long, env = "HELM_BIN", default_value = HELM_BINARY)]
    helm_bin: String,

    /// The helm home directory. Helm uses ~/.helm if this is not set.
    #[arg(global = true, long, env = "HELM_HOME", value_name = "DIR_PATH")]
    helm_home: Option<PathBuf>,

    /// Where published charts are kept.
    #[command(flatten)]
    storage: StorageArgs,
}

/// Options for the bucket published charts are kept in.
#[derive(Args)]
pub(crate) struct StorageArgs {
    /// The storage backend: s3, local or memory.
    #[arg(global = true, long, env = "CHART_STORAGE_TYPE", default_value = "s3")]
    storage_type: String,

    /// The bucket name, or the root directory for the local backend.
    #[arg(global = true, long, env = "CHART_BUCKET", default_value = "")]
    bucket: String,

    /// The S3 region.
    #[arg(global = true, long, env = "AWS_REGION")]
    region: Option<String>,

    /// The S3 endpoint, for S3-compatible stores.
    #[arg(global = true, long, env = "AWS_ENDPOINT")]
    endpoint: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum Operation {
    /// Package a chart and upload it to the bucket.
    Publish {
        /// The project the chart belongs to.
        #[arg(long)]
        project: String,
        /// The chart directory. Its name is the chart name.
        #[arg(long, value_name = "DIR_PATH")]
        chart_path: PathBuf,
        /// The git ref the chart is published for.
        #[arg(long)]
        git_ref: String,
    },
    /// Download and extract every chart published for a project at a git ref.
    Pull {
        /// The project the charts belong to.
        #[arg(long)]
        project: String,
        /// The git ref the charts were published for.
        #[arg(long)]
        git_ref: String,
        /// Where to extract the charts.
        #[arg(long, value_name = "DIR_PATH")]
        dest_dir: PathBuf,
    },
    /// List the values files which would be used for a cluster and namespace.
    Values {
        #[arg(long, value_name = "DIR_PATH")]
        chart_path: PathBuf,
        #[arg(long)]
        cluster: String,
        #[arg(short, long)]
        namespace: String,
    },
    /// Check whether a release exists.
    Exists {
        #[arg(long)]
        release_name: String,
    },
    /// Install or upgrade a release.
    Start {
        #[command(flatten)]
        install: InstallArgs,
        /// Force resource updates through delete and recreate.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Render and validate a release install without changing the cluster.
    DryRun {
        #[command(flatten)]
        install: InstallArgs,
    },
    /// Delete and purge a release, if it exists.
    Stop {
        #[arg(long)]
        release_name: String,
    },
    /// Roll a release back to a revision, or by a number of revisions.
    Rollback {
        #[arg(long)]
        release_name: String,
        /// The revision to roll back to.
        #[arg(long, conflicts_with = "relative")]
        revision: Option<u64>,
        /// How many revisions to go back from the current one, when no revision is given.
        #[arg(long, default_value_t = 1)]
        relative: u64,
    },
}

/// Options shared by start and dry-run.
#[derive(Args)]
pub(crate) struct InstallArgs {
    /// This is the release name of the Helm chart.
    #[arg(long)]
    pub(crate) release_name: String,

    /// The chart directory.
    #[arg(long, value_name = "DIR_PATH")]
    pub(crate) chart_path: PathBuf,

    /// The cluster being deployed to. Selects values/values.<cluster>.yaml.
    #[arg(long, env = "CLUSTER_NAME")]
    pub(crate) cluster: String,

    /// This is the Kubernetes Namespace for the Helm release.
    #[arg(short, long)]
    pub(crate) namespace: String,

    /// Chart values to override (can specify multiple: --set key1=val1 --set key2=val2).
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<SetValue>,

    /// Extra arguments passed through to helm, after '--'.
    #[arg(last = true)]
    pub(crate) helm_args: Vec<String>,
}

impl InstallArgs {
    /// The --set values, in the order they were given.
    pub(crate) fn overrides(&self) -> ValueOverrides {
        self.set.iter().cloned().collect()
    }
}

impl CliArgs {
    /// This returns the operation to run.
    pub(crate) fn operation(&self) -> &Operation {
        &self.operation
    }

    /// This returns formatting style to be used.
    pub(crate) fn fmt_style(&self) -> FmtStyle {
        self.fmt_style
    }

    /// This returns ansi_colours arg.
    pub(crate) fn ansi_colours(&self) -> bool {
        self.ansi_colors
    }

    /// This returns the helm binary to run.
    pub(crate) fn helm_bin(&self) -> &str {
        self.helm_bin.as_str()
    }

    /// This returns the helm home directory, if one was given.
    pub(crate) fn helm_home(&self) -> Option<&PathBuf> {
        self.helm_home.as_ref()
    }

    /// This returns the bucket configuration.
    pub(crate) fn storage_config(&self) -> StorageConfig {
        StorageConfig {
            storage_type: self.storage.storage_type.clone(),
            bucket: self.storage.bucket.clone(),
            region: self.storage.region.clone(),
            endpoint: self.storage.endpoint.clone(),
        }
    }
}
