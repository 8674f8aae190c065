use crate::common::{
    constants::LIST_NAME_HEADER,
    error::{ReleaseNotListed, Result, RevisionParse},
};
use snafu::{OptionExt, ResultExt};

/// Reads the current revision of `release_name` from the tabular output of `helm list`.
///
/// Columns are tab separated and padded with spaces: NAME, REVISION, UPDATED, STATUS, CHART,
/// APP VERSION, NAMESPACE. The first row whose NAME is exactly `release_name` is used.
pub fn parse_revision(list_output: &str, release_name: &str) -> Result<u64> {
    let revision = list_output
        .lines()
        .map(|line| line.split('\t').map(str::trim).collect::<Vec<_>>())
        .filter(|cells| cells.first() != Some(&LIST_NAME_HEADER))
        .find(|cells| cells.first() == Some(&release_name))
        .context(ReleaseNotListed { name: release_name })?
        .get(1)
        .copied()
        .unwrap_or_default();

    revision.parse::<u64>().context(RevisionParse {
        name: release_name,
        revision,
    })
}

#[cfg(test)]
mod tests {
    use super::parse_revision;
    use crate::common::error::Error;

    const LIST: &str = "NAME    \tREVISION\tUPDATED                 \tSTATUS  \tCHART       \tAPP VERSION\tNAMESPACE\n\
                        api     \t7       \tMon Oct  5 10:00:00 2026\tDEPLOYED\tapi-0.0.0   \t1.0        \tweb\n\
                        api-docs\t12      \tMon Oct  5 11:00:00 2026\tDEPLOYED\tdocs-0.0.0  \t1.0        \tweb\n";

    #[test]
    fn reads_revision_column() {
        assert_eq!(parse_revision(LIST, "api").unwrap(), 7);
        assert_eq!(parse_revision(LIST, "api-docs").unwrap(), 12);
    }

    #[test]
    fn name_must_match_exactly() {
        assert!(matches!(
            parse_revision(LIST, "ap"),
            Err(Error::ReleaseNotListed { name }) if name == "ap"
        ));
    }

    #[test]
    fn empty_output() {
        assert!(matches!(
            parse_revision("", "api"),
            Err(Error::ReleaseNotListed { .. })
        ));
    }

    #[test]
    fn header_is_never_a_release() {
        let header_only = "NAME\tREVISION\tUPDATED\n";
        assert!(matches!(
            parse_revision(header_only, "NAME"),
            Err(Error::ReleaseNotListed { .. })
        ));
    }

    #[test]
    fn malformed_rows() {
        assert!(matches!(
            parse_revision("api\tseven\tyesterday\n", "api"),
            Err(Error::RevisionParse { revision, .. }) if revision == "seven"
        ));
        assert!(matches!(
            parse_revision("api\n", "api"),
            Err(Error::RevisionParse { revision, .. }) if revision.is_empty()
        ));
        assert!(matches!(
            parse_revision("api   7   DEPLOYED\n", "api"),
            Err(Error::ReleaseNotListed { .. })
        ));
    }
}
