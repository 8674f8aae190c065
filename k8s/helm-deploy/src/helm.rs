/// Contains the HelmClient and its builder.
pub mod client;

/// Contains tools to read helm charts' Chart.yaml.
pub mod chart;

/// Contains the parser for `helm list` output.
pub mod list;

/// Contains the ordered `--set` overrides.
pub mod overrides;

/// Install, upgrade, delete and rollback of helm releases.
pub mod release;

/// Contains the lookup of override values files.
pub mod values;
