use crate::common::constants::{LOCAL_CLUSTER, SITE_VALUES_FILE, VALUES_DIR};
use std::path::{Path, PathBuf};
use tracing::info;

/// Finds the override values files for a cluster and namespace, in increasing priority:
/// - values/values.<cluster>.yaml
/// - values/values.<cluster>.<namespace>.yaml
/// - values/site.yaml, only on the LOCAL cluster.
///
/// Files which do not exist are left out. Helm gives precedence to the later `--values`
/// arguments, so the order of the returned list is significant.
pub fn find_values<P>(chart_path: P, cluster_name: &str, namespace: &str) -> Vec<PathBuf>
where
    P: AsRef<Path>,
{
    let values_dir = chart_path.as_ref().join(VALUES_DIR);
    let mut values = Vec::with_capacity(3);

    let cluster_values_path = values_dir.join(format!("values.{cluster_name}.yaml"));
    if cluster_values_path.is_file() {
        info!(path = %cluster_values_path.display(), "Found cluster values file");
        values.push(cluster_values_path);
    }

    let cluster_namespace_values_path =
        values_dir.join(format!("values.{cluster_name}.{namespace}.yaml"));
    if cluster_namespace_values_path.is_file() {
        info!(path = %cluster_namespace_values_path.display(), "Found cluster namespace values file");
        values.push(cluster_namespace_values_path);
    }

    let site_values_path = values_dir.join(SITE_VALUES_FILE);
    if cluster_name == LOCAL_CLUSTER && site_values_path.is_file() {
        info!(path = %site_values_path.display(), "Found site values file");
        values.push(site_values_path);
    }

    values
}

#[cfg(test)]
mod tests {
    use super::find_values;
    use std::{fs, path::Path};

    fn touch(chart: &Path, name: &str) {
        let dir = chart.join("values");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), b"replicas: 1\n").unwrap();
    }

    #[test]
    fn no_values_directory() {
        let chart = tempfile::tempdir().unwrap();
        assert!(find_values(chart.path(), "PROD", "web").is_empty());
    }

    #[test]
    fn increasing_precedence_order() {
        let chart = tempfile::tempdir().unwrap();
        touch(chart.path(), "site.yaml");
        touch(chart.path(), "values.LOCAL.web.yaml");
        touch(chart.path(), "values.LOCAL.yaml");

        let values = find_values(chart.path(), "LOCAL", "web");
        let names: Vec<_> = values
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["values.LOCAL.yaml", "values.LOCAL.web.yaml", "site.yaml"]
        );
        assert!(values.iter().all(|p| p.starts_with(chart.path().join("values"))));
    }

    #[test]
    fn site_values_only_on_local_cluster() {
        let chart = tempfile::tempdir().unwrap();
        touch(chart.path(), "site.yaml");
        touch(chart.path(), "values.PROD.yaml");

        let values = find_values(chart.path(), "PROD", "web");
        assert_eq!(values, vec![chart.path().join("values/values.PROD.yaml")]);
    }

    #[test]
    fn other_namespaces_are_ignored() {
        let chart = tempfile::tempdir().unwrap();
        touch(chart.path(), "values.PROD.api.yaml");

        assert!(find_values(chart.path(), "PROD", "web").is_empty());
        assert_eq!(
            find_values(chart.path(), "PROD", "api"),
            vec![chart.path().join("values/values.PROD.api.yaml")]
        );
    }

    #[test]
    fn directories_are_not_values_files() {
        let chart = tempfile::tempdir().unwrap();
        fs::create_dir_all(chart.path().join("values/values.PROD.yaml")).unwrap();
        assert!(find_values(chart.path(), "PROD", "web").is_empty());
    }
}
