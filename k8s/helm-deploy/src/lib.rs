/// Contains constants, errors, macros and logging setup shared across the crate.
pub mod common;
/// Module for helm commands which act on releases, and their inputs.
pub mod helm;
/// Module for publishing and fetching chart archives.
pub mod publish;
/// Module for running external commands.
pub mod runner;
/// Validations of user input before any command runs.
pub mod validators;

#[cfg(test)]
pub(crate) mod test_utils;

pub use common::error::{Error, Result};
pub use helm::{
    client::{HelmClient, HelmClientBuilder, ReleaseRules},
    overrides::{SetValue, ValueOverrides},
    values::find_values,
};
pub use publish::bucket::{ChartBucket, ObjectStoreBucket, PublishRules, StorageConfig};
