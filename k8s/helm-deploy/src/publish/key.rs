use crate::common::constants::{CHARTS_KEY_ROOT, CHART_ARCHIVE_EXTENSION, CHART_VERSION};

/// The "directory" holding every chart archive published for a project at a git ref:
/// `helm_charts/0.0.0/<project>/<git_ref>/`.
pub fn package_dir_prefix(project_name: &str, git_ref: &str) -> String {
    format!("{CHARTS_KEY_ROOT}/{CHART_VERSION}/{project_name}/{git_ref}/")
}

/// The key of a chart archive: `helm_charts/0.0.0/<project>/<git_ref>/<chart>.<git_ref>.tgz`.
pub fn package_key(project_name: &str, chart_name: &str, git_ref: &str) -> String {
    format!(
        "{}{chart_name}{}",
        package_dir_prefix(project_name, git_ref),
        package_suffix(git_ref)
    )
}

/// Every chart archive key for a git ref ends with this: `.<git_ref>.tgz`.
pub fn package_suffix(git_ref: &str) -> String {
    format!(".{git_ref}.{CHART_ARCHIVE_EXTENSION}")
}

/// The name of the archive `helm package --version 0.0.0` writes for a chart.
pub fn local_package_name(chart_name: &str) -> String {
    format!("{chart_name}-{CHART_VERSION}.{CHART_ARCHIVE_EXTENSION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_layout() {
        assert_eq!(
            package_key("demo", "api", "abc123"),
            "helm_charts/0.0.0/demo/abc123/api.abc123.tgz"
        );
        assert_eq!(
            package_dir_prefix("demo", "abc123"),
            "helm_charts/0.0.0/demo/abc123/"
        );
        assert_eq!(package_suffix("abc123"), ".abc123.tgz");
        assert_eq!(local_package_name("api"), "api-0.0.0.tgz");
    }

    #[test]
    fn key_is_prefix_plus_chart_plus_suffix() {
        for (project, chart, git_ref) in [
            ("demo", "api", "abc123"),
            ("billing", "worker-queue", "0f1e2d3c4b5a"),
            ("a", "b", "c"),
        ] {
            let key = package_key(project, chart, git_ref);
            assert_eq!(
                key,
                format!("helm_charts/0.0.0/{project}/{git_ref}/{chart}.{git_ref}.tgz")
            );
            assert!(key.starts_with(&package_dir_prefix(project, git_ref)));
            assert!(key.ends_with(&package_suffix(git_ref)));
        }
    }
}
