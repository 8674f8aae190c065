use crate::common::error::{Error, InvalidSetValue, Result};
use snafu::OptionExt;
use std::str::FromStr;

/// A single `--set key=value` override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetValue {
    key: String,
    value: String,
}

impl SetValue {
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: ToString,
        V: ToString,
    {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

impl FromStr for SetValue {
    type Err = Error;

    /// Parses `key=value`. The value may itself contain '=', the key may not be empty.
    fn from_str(input: &str) -> Result<Self> {
        let (key, value) = input
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .context(InvalidSetValue { input })?;
        Ok(Self::new(key.trim(), value))
    }
}

/// Chart values overridden on the command line, rendered as `--set key=value` in insertion
/// order. Setting a key twice keeps its first position and the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueOverrides {
    entries: Vec<SetValue>,
}

impl ValueOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an override, replacing the value of an existing key in place.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: ToString,
        V: ToString,
    {
        self.insert(SetValue::new(key, value));
    }

    fn insert(&mut self, entry: SetValue) {
        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => existing.value = entry.value,
            None => self.entries.push(entry),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SetValue> {
        self.entries.iter()
    }

    /// Helm arguments for these overrides.
    pub(crate) fn to_args(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|entry| ["--set".to_string(), format!("{}={}", entry.key, entry.value)])
            .collect()
    }
}

impl FromIterator<SetValue> for ValueOverrides {
    fn from_iter<T: IntoIterator<Item = SetValue>>(iter: T) -> Self {
        let mut overrides = Self::new();
        for entry in iter {
            overrides.insert(entry);
        }
        overrides
    }
}

impl<K, V> FromIterator<(K, V)> for ValueOverrides
where
    K: ToString,
    V: ToString,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(key, value)| SetValue::new(key, value))
            .collect()
    }
}
