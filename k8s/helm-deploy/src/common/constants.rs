/// This is the default name of the helm binary, looked up in $PATH.
pub const HELM_BINARY: &str = "helm";

/// This is the default name of the archive extraction binary, looked up in $PATH.
pub const TAR_BINARY: &str = "tar";

/// This is the environment variable helm v2 reads its home directory from.
pub const HELM_HOME_ENV: &str = "HELM_HOME";

/// Every published chart is packaged with this version. The git ref carries the real version.
pub const CHART_VERSION: &str = "0.0.0";

/// This is the root of every published chart key in the bucket.
pub const CHARTS_KEY_ROOT: &str = "helm_charts";

/// This is the extension of packaged chart archives.
pub const CHART_ARCHIVE_EXTENSION: &str = "tgz";

/// This is the cluster name of a developer's local environment. The site values file is only
/// honoured for this cluster.
pub const LOCAL_CLUSTER: &str = "LOCAL";

/// This is the directory inside a chart which holds the override values files.
pub const VALUES_DIR: &str = "values";

/// This is the name of the site-level values file.
pub const SITE_VALUES_FILE: &str = "site.yaml";

/// This is the name of the file which describes a helm chart.
pub const CHART_YAML: &str = "Chart.yaml";

/// This is the header of the NAME column in `helm list` output.
pub const LIST_NAME_HEADER: &str = "NAME";
