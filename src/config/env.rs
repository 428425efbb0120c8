//! Environment variable configuration layer.

use std::ffi::OsString;

use super::source::{Layer, DEFAULT_SECTION};
use super::{ConfigError, Store};

/// A layer built from environment variables sharing a prefix.
///
/// `PREFIX<sep>SECTION<sep>KEY` sets `KEY` in `SECTION`, and
/// `PREFIX<sep>KEY` sets `KEY` in the default section. Section and key
/// segments are lowercased with `_` turned into `-`, so
/// `APP__EXCHANGE__ACCESS_KEY` sets `access-key` in `exchange`.
#[derive(Debug, Clone)]
pub struct EnvLayer {
    prefix: String,
    separator: String,
}

impl EnvLayer {
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        assert!(!separator.is_empty(), "separator must not be empty");
        Self {
            prefix: prefix.into(),
            separator,
        }
    }

    /// Builds a store from `vars`, skipping names and values that are not
    /// valid Unicode.
    fn collect(&self, vars: impl IntoIterator<Item = (OsString, OsString)>) -> Store {
        let prefix_with_sep = format!("{}{}", self.prefix, self.separator);
        let mut store = Store::new();

        for (name, value) in vars {
            let (name, value) = match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => (name, value),
                (Ok(name), Err(_)) => {
                    tracing::debug!(variable = %name, "ignoring non-unicode environment value");
                    continue;
                }
                (Err(name), _) => {
                    tracing::debug!(variable = ?name, "ignoring non-unicode environment variable");
                    continue;
                }
            };
            let Some(path) = name.strip_prefix(&prefix_with_sep) else {
                continue;
            };
            let segments: Vec<String> = path.split(&self.separator).map(normalize).collect();

            match segments.as_slice() {
                [key] if !key.is_empty() => {
                    store.insert(DEFAULT_SECTION, key.as_str(), value);
                }
                [section, key] if !section.is_empty() && !key.is_empty() => {
                    store.insert(section.as_str(), key.as_str(), value);
                }
                _ => tracing::debug!(variable = %name, "ignoring environment variable"),
            }
        }

        store
    }
}

impl Layer for EnvLayer {
    fn load(&self) -> Result<Store, ConfigError> {
        Ok(self.collect(std::env::vars_os()))
    }
}

fn normalize(segment: &str) -> String {
    segment.to_lowercase().replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(OsString, OsString)> {
        pairs
            .iter()
            .map(|(k, v)| (OsString::from(*k), OsString::from(*v)))
            .collect()
    }

    #[test]
    fn test_section_and_key() {
        let layer = EnvLayer::new("APP", "__");
        let store = layer.collect(vars(&[
            ("APP__EXCHANGE__ACCESS_KEY", "ak"),
            ("APP__NAME", "svc"),
            ("OTHER__NAME", "ignored"),
        ]));

        assert_eq!(store.get("exchange", "access-key"), Some("ak"));
        assert_eq!(store.get("DEFAULT", "name"), Some("svc"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_ignores_malformed_names() {
        let layer = EnvLayer::new("APP", "__");
        let store = layer.collect(vars(&[
            ("APP__", "empty"),
            ("APP__A__B__C", "too deep"),
            ("APP____KEY", "empty section"),
        ]));

        assert!(store.is_empty());
    }

    #[test]
    fn test_reads_process_environment() {
        std::env::set_var("CONFBIND_ENV_TEST__MYSQL__URL", "mysql://env");

        let store = EnvLayer::new("CONFBIND_ENV_TEST", "__").load().unwrap();

        assert_eq!(store.get("mysql", "url"), Some("mysql://env"));
        std::env::remove_var("CONFBIND_ENV_TEST__MYSQL__URL");
    }

    #[cfg(unix)]
    #[test]
    fn test_skips_non_unicode_variables() {
        use std::os::unix::ffi::OsStringExt;

        let layer = EnvLayer::new("APP", "__");
        let mut input = vars(&[("APP__MYSQL__URL", "mysql://env")]);
        input.push((
            OsString::from("APP__MYSQL__PASSWORD"),
            OsString::from_vec(vec![0x70, 0xff, 0xfe]),
        ));
        input.push((
            OsString::from_vec(b"APP__MYSQL__\xffHOST".to_vec()),
            OsString::from("db"),
        ));

        let store = layer.collect(input);

        assert_eq!(store.get("mysql", "url"), Some("mysql://env"));
        assert_eq!(store.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_load_tolerates_non_unicode_process_environment() {
        use std::os::unix::ffi::OsStringExt;

        let name = "CONFBIND_ENV_BYTES__MYSQL__PASSWORD";
        std::env::set_var(name, OsString::from_vec(vec![0xff, 0xfe]));
        std::env::set_var("CONFBIND_ENV_BYTES__MYSQL__URL", "mysql://env");

        let store = EnvLayer::new("CONFBIND_ENV_BYTES", "__").load().unwrap();

        assert_eq!(store.get("mysql", "url"), Some("mysql://env"));
        assert!(!store.contains("mysql", "password"));
        std::env::remove_var(name);
        std::env::remove_var("CONFBIND_ENV_BYTES__MYSQL__URL");
    }

    #[test]
    #[should_panic(expected = "separator must not be empty")]
    fn test_empty_separator_panics() {
        let _ = EnvLayer::new("APP", "");
    }
}
