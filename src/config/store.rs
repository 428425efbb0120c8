//! In-memory sectioned key-value store.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use toml::{Table, Value};

use super::resolve::escape;
use super::source::{ConfigSource, DEFAULT_SECTION};
use super::ConfigError;

/// Raw string values grouped by section, in insertion order.
///
/// Serializes as a table of tables, which is also the TOML layout
/// [`FileLayer`](super::FileLayer) reads back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Store {
    sections: IndexMap<String, IndexMap<String, String>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value, returning the one it replaced.
    pub fn insert(
        &mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.sections
            .entry(section.into())
            .or_default()
            .insert(key.into(), value.into())
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section)?.get(key).map(String::as_str)
    }

    pub fn contains(&self, section: &str, key: &str) -> bool {
        self.get(section, key).is_some()
    }

    pub fn remove(&mut self, section: &str, key: &str) -> Option<String> {
        self.sections.get_mut(section)?.shift_remove(key)
    }

    pub fn section(&self, name: &str) -> Option<&IndexMap<String, String>> {
        self.sections.get(name)
    }

    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Iterates `(section, key, value)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.sections.iter().flat_map(|(section, keys)| {
            keys.iter()
                .map(move |(key, value)| (section.as_str(), key.as_str(), value.as_str()))
        })
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &str, &mut String)> {
        self.sections.iter_mut().flat_map(|(section, keys)| {
            keys.iter_mut()
                .map(move |(key, value)| (section.as_str(), key.as_str(), value))
        })
    }

    /// Number of keys across all sections.
    pub fn len(&self) -> usize {
        self.sections.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies every value of `other` over this store.
    pub fn merge(&mut self, other: Store) {
        for (section, keys) in other.sections {
            let target = self.sections.entry(section).or_default();
            for (key, value) in keys {
                target.insert(key, value);
            }
        }
    }

    /// Flattens a TOML table.
    ///
    /// Top-level scalars land in [`DEFAULT_SECTION`], top-level tables become
    /// sections, and deeper tables become `parent.child` sections. Arrays
    /// have no string form and are rejected.
    pub fn from_table(table: Table) -> Result<Self, ConfigError> {
        let mut store = Store::new();
        for (name, value) in table {
            match value {
                Value::Table(keys) => store.flatten_section(&name, keys)?,
                scalar => {
                    let rendered = scalar_to_string(&scalar, &name)?;
                    store.insert(DEFAULT_SECTION, name, rendered);
                }
            }
        }
        Ok(store)
    }

    fn flatten_section(&mut self, section: &str, table: Table) -> Result<(), ConfigError> {
        // Keep empty sections visible.
        self.sections.entry(section.to_string()).or_default();

        for (key, value) in table {
            match value {
                Value::Table(child) => self.flatten_section(&format!("{section}.{key}"), child)?,
                scalar => {
                    let rendered = scalar_to_string(&scalar, &format!("{section}.{key}"))?;
                    self.insert(section, key, rendered);
                }
            }
        }
        Ok(())
    }

    /// Returns a copy with every `$` doubled.
    ///
    /// Values written to a file that [`Config`](super::Config) reads back go
    /// through reference expansion; escaping first makes them load verbatim.
    pub fn escaped(&self) -> Store {
        let mut store = self.clone();
        escape(&mut store);
        store
    }

    /// Renders the store as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(ConfigError::Serialize)
    }
}

impl ConfigSource for Store {
    fn get_value(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key)
    }
}

fn scalar_to_string(value: &Value, path: &str) -> Result<String, ConfigError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Datetime(dt) => Ok(dt.to_string()),
        Value::Array(_) | Value::Table(_) => Err(ConfigError::NonScalarValue(path.to_string())),
    }
}
