use crate::common::{
    constants::CHART_YAML,
    error::{InvalidChartPath, ReadingFile, Result, ValidateDirPath, YamlParseFromFile},
};
use serde::Deserialize;
use snafu::{OptionExt, ResultExt};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// This struct is used to deserialize helm charts' Chart.yaml file.
#[derive(Debug, Deserialize)]
pub struct Chart {
    /// This is the name of the helm chart.
    name: String,
    /// This is the version of the helm chart. Published charts are re-versioned when packaged.
    #[serde(default)]
    version: Option<String>,
}

impl Chart {
    /// Reads and parses <chart_dir>/Chart.yaml.
    pub fn from_chart_dir<P>(chart_dir: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let filepath = chart_dir.as_ref().join(CHART_YAML);
        let buf = fs::read(filepath.as_path()).context(ReadingFile {
            filepath: filepath.clone(),
        })?;
        serde_yaml::from_slice(buf.as_slice()).context(YamlParseFromFile { filepath })
    }

    /// This is a getter for the helm chart name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// This is a getter for the helm chart version.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

/// Resolves a chart directory into the directory holding it and the chart directory's name.
/// Symlinks and components such as `.` are resolved first, so the name is the one helm is
/// given when packaging from the parent directory.
pub(crate) fn chart_location(chart_path: &Path) -> Result<(PathBuf, String)> {
    let resolved = chart_path
        .canonicalize()
        .context(ValidateDirPath { path: chart_path })?;

    let chart_name = resolved
        .file_name()
        .and_then(|name| name.to_str())
        .map(ToString::to_string)
        .context(InvalidChartPath { path: chart_path })?;
    let charts_dir = resolved
        .parent()
        .map(Path::to_path_buf)
        .context(InvalidChartPath { path: chart_path })?;

    Ok((charts_dir, chart_name))
}

#[cfg(test)]
mod tests {
    use super::{chart_location, Chart};
    use crate::common::error::Error;
    use std::{fs, path::Path};

    #[test]
    fn reads_chart_yaml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Chart.yaml"),
            "apiVersion: v1\nname: api\nversion: 1.4.2\ndescription: API server\n",
        )
        .unwrap();

        let chart = Chart::from_chart_dir(dir.path()).unwrap();
        assert_eq!(chart.name(), "api");
        assert_eq!(chart.version(), Some("1.4.2"));
    }

    #[test]
    fn missing_or_invalid_chart_yaml() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Chart::from_chart_dir(dir.path()).is_err());

        fs::write(dir.path().join("Chart.yaml"), "version: 1.0.0\n").unwrap();
        assert!(Chart::from_chart_dir(dir.path()).is_err());
    }

    #[test]
    fn chart_location_resolves_the_directory() {
        let root = tempfile::tempdir().unwrap();
        let charts = root.path().canonicalize().unwrap().join("charts");
        fs::create_dir_all(charts.join("api")).unwrap();

        let expected = (charts.clone(), "api".to_string());
        assert_eq!(chart_location(&charts.join("api")).unwrap(), expected);
        assert_eq!(chart_location(&charts.join("api/.")).unwrap(), expected);
        assert_eq!(chart_location(&charts.join("api/../api/")).unwrap(), expected);
    }

    #[cfg(unix)]
    #[test]
    fn chart_location_follows_symlinks() {
        let root = tempfile::tempdir().unwrap();
        let charts = root.path().canonicalize().unwrap().join("charts");
        fs::create_dir_all(charts.join("api")).unwrap();
        let link = root.path().join("current");
        std::os::unix::fs::symlink(charts.join("api"), &link).unwrap();

        assert_eq!(
            chart_location(&link).unwrap(),
            (charts, "api".to_string())
        );
    }

    #[test]
    fn chart_location_rejects_unusable_paths() {
        let root = tempfile::tempdir().unwrap();
        assert!(matches!(
            chart_location(&root.path().join("missing")),
            Err(Error::ValidateDirPath { .. })
        ));
        assert!(matches!(
            chart_location(Path::new("/")),
            Err(Error::InvalidChartPath { .. })
        ));
    }
}
