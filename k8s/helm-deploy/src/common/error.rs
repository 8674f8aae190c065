use snafu::Snafu;
use std::path::PathBuf;

/// For use with multiple fallible operations which may fail for different reasons, but are
/// defined withing the same scope and must return to the outer scope (calling scope) using
/// the try operator -- '?'.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))]
pub enum Error {
    /// Error for when a command could not be spawned, e.g. the binary is not in $PATH.
    #[snafu(display(
        "Failed to run command,\ncommand: {},\nargs: {:?},\ncommand_error: {}",
        command,
        args,
        source
    ))]
    RunCommand {
        source: std::io::Error,
        command: String,
        args: Vec<String>,
    },

    /// Error for when the `helm init` command fails.
    #[snafu(display(
        "Helm init command failed,\ncommand: {},\nargs: {:?},\nstd_err: {}",
        command,
        args,
        std_err
    ))]
    HelmInitCommand {
        command: String,
        args: Vec<String>,
        std_err: String,
    },

    /// Error for when the `helm package` command fails.
    #[snafu(display(
        "Helm package command failed,\ncommand: {},\nargs: {:?},\nstd_err: {}",
        command,
        args,
        std_err
    ))]
    HelmPackageCommand {
        command: String,
        args: Vec<String>,
        std_err: String,
    },

    /// Error for when the `helm upgrade --install` command fails.
    #[snafu(display(
        "Helm upgrade command failed,\ncommand: {},\nargs: {:?},\nstd_err: {}",
        command,
        args,
        std_err
    ))]
    HelmUpgradeCommand {
        command: String,
        args: Vec<String>,
        std_err: String,
    },

    /// Error for when the `helm delete` command fails.
    #[snafu(display(
        "Helm delete command failed,\ncommand: {},\nargs: {:?},\nstd_err: {}",
        command,
        args,
        std_err
    ))]
    HelmDeleteCommand {
        command: String,
        args: Vec<String>,
        std_err: String,
    },

    /// Error for when the `helm rollback` command fails.
    #[snafu(display(
        "Helm rollback command failed,\ncommand: {},\nargs: {:?},\nstd_err: {}",
        command,
        args,
        std_err
    ))]
    HelmRollbackCommand {
        command: String,
        args: Vec<String>,
        std_err: String,
    },

    /// Error for when the `helm list` command fails.
    #[snafu(display(
        "Helm list command failed,\ncommand: {},\nargs: {:?},\nstd_err: {}",
        command,
        args,
        std_err
    ))]
    HelmListCommand {
        command: String,
        args: Vec<String>,
        std_err: String,
    },

    /// Error for when the `helm version` command fails.
    #[snafu(display(
        "Helm version command failed,\ncommand: {},\nargs: {:?},\nstd_err: {}",
        command,
        args,
        std_err
    ))]
    HelmVersionCommand {
        command: String,
        args: Vec<String>,
        std_err: String,
    },

    /// Error for when a chart archive could not be extracted.
    #[snafu(display(
        "Failed to extract chart archive {},\ncommand: {},\nargs: {:?},\nstd_err: {}",
        archive.display(),
        command,
        args,
        std_err
    ))]
    ExtractArchiveCommand {
        archive: PathBuf,
        command: String,
        args: Vec<String>,
        std_err: String,
    },

    /// Error for when a chart archive could not be uploaded to the bucket.
    #[snafu(display("Failed to upload {} to {}: {}", filepath.display(), key, source))]
    UploadObject {
        source: object_store::Error,
        filepath: PathBuf,
        key: String,
    },

    /// Error for when a chart archive could not be downloaded from the bucket.
    #[snafu(display("Failed to download {}: {}", key, source))]
    DownloadObject {
        source: object_store::Error,
        key: String,
    },

    /// Error for when the objects under a prefix could not be listed.
    #[snafu(display("Failed to list objects under prefix {}: {}", prefix, source))]
    ListObjects {
        source: object_store::Error,
        prefix: String,
    },

    /// Error for when the object store client could not be built.
    #[snafu(display("Failed to build {} object store for {}: {}", storage_type, bucket, source))]
    StorageBuild {
        source: object_store::Error,
        storage_type: String,
        bucket: String,
    },

    /// Error for when the configured storage type is not known.
    #[snafu(display("Unsupported storage type: {}", storage_type))]
    UnsupportedStorage { storage_type: String },

    /// Error when reading a file.
    #[snafu(display("Failed to read from {}: {}", filepath.display(), source))]
    ReadingFile {
        source: std::io::Error,
        filepath: PathBuf,
    },

    /// Error when writing a file.
    #[snafu(display("Failed to write to {}: {}", filepath.display(), source))]
    WritingFile {
        source: std::io::Error,
        filepath: PathBuf,
    },

    /// Error when removing a file.
    #[snafu(display("Failed to remove {}: {}", filepath.display(), source))]
    RemoveFile {
        source: std::io::Error,
        filepath: PathBuf,
    },

    /// Error when creating a directory.
    #[snafu(display("Failed to create directory {}: {}", path.display(), source))]
    CreateDirectory {
        source: std::io::Error,
        path: PathBuf,
    },

    /// Error for when Vec<u8> to str conversion fails.
    #[snafu(display("Failed to convert Vec<u8> to UTF-8 formatted string: {}", source))]
    U8VectorToString { source: std::str::Utf8Error },

    /// Error for when the `helm list` output has no row for the release.
    #[snafu(display("Release {} not found in helm list output", name))]
    ReleaseNotListed { name: String },

    /// Error for when the REVISION column of a `helm list` row is not a number.
    #[snafu(display("Failed to parse revision '{}' of release {}: {}", revision, name, source))]
    RevisionParse {
        source: std::num::ParseIntError,
        name: String,
        revision: String,
    },

    /// Error for when yaml could not be parsed from a file (Reader).
    #[snafu(display("Failed to parse YAML at {}: {}", filepath.display(), source))]
    YamlParseFromFile {
        source: serde_yaml::Error,
        filepath: PathBuf,
    },

    /// Error for when the path to a directory cannot be validated.
    #[snafu(display("Failed to validate directory path {}: {}", path.display(), source))]
    ValidateDirPath {
        source: std::io::Error,
        path: PathBuf,
    },

    /// Error for when the path to a file cannot be validated.
    #[snafu(display("Failed to validate filepath {}: {}", path.display(), source))]
    ValidateFilePath {
        source: std::io::Error,
        path: PathBuf,
    },

    /// Error for when the path is not that of a directory.
    #[snafu(display("{} is not a directory", path.display()))]
    NotADirectory { path: PathBuf },

    /// Error for when the path is not that of a file.
    #[snafu(display("{} is not a file", path.display()))]
    NotAFile { path: PathBuf },

    /// Error for when the name in Chart.yaml differs from the chart directory name.
    #[snafu(display(
        "Chart at {} is named '{}', but its directory is named '{}'",
        path.display(),
        chart_name,
        dir_name
    ))]
    ChartNameMismatch {
        path: PathBuf,
        chart_name: String,
        dir_name: String,
    },

    /// Error for when a chart path has no usable final component or parent.
    #[snafu(display("Invalid helm chart path {}", path.display()))]
    InvalidChartPath { path: PathBuf },

    /// Error for when a release name is not a valid DNS-1123 label.
    #[snafu(display("Invalid helm release name '{}'", name))]
    InvalidReleaseName { name: String },

    /// Error for when a git ref cannot be used as an object key segment.
    #[snafu(display("Invalid git ref '{}'", git_ref))]
    InvalidGitRef { git_ref: String },

    /// Error for when regular expression parsing or compilation fails.
    #[snafu(display("Failed to compile regex {}: {}", expression, source))]
    RegexCompile {
        source: regex::Error,
        expression: String,
    },

    /// Error for when a `--set` argument is not of the form key=value.
    #[snafu(display("Invalid value override '{}', expected key=value", input))]
    InvalidSetValue { input: String },
}

/// A wrapper type to remove repeated Result<T, Error> returns.
pub type Result<T, E = Error> = std::result::Result<T, E>;
