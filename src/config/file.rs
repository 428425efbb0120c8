//! File-based configuration layer.

use std::path::{Path, PathBuf};

use super::source::Layer;
use super::{ConfigError, Store};

/// A layer that loads a TOML file.
///
/// Required files that don't exist cause an error; optional files that
/// don't exist yield an empty store.
#[derive(Debug, Clone)]
pub struct FileLayer {
    path: PathBuf,
    required: bool,
}

impl FileLayer {
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }
}

impl FileLayer {
    /// Reads the file, treating a missing optional file as absent.
    fn read(&self) -> Result<Option<String>, ConfigError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !self.required => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ConfigError::FileNotFound(self.path.clone()))
            }
            Err(source) => Err(ConfigError::ReadError {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl Layer for FileLayer {
    fn load(&self) -> Result<Store, ConfigError> {
        let Some(contents) = self.read()? else {
            tracing::debug!(path = %self.path.display(), "optional config file not present");
            return Ok(Store::new());
        };

        let table: toml::Table =
            toml::from_str(&contents).map_err(|source| ConfigError::ParseError {
                path: self.path.clone(),
                source,
            })?;
        let store = Store::from_table(table)?;

        tracing::debug!(path = %self.path.display(), keys = store.len(), "loaded config file");
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_layer_loads_sections() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name = \"svc\"").unwrap();
        writeln!(file, "[mysql]").unwrap();
        writeln!(file, "url = \"mysql://localhost\"").unwrap();

        let store = FileLayer::new(file.path(), true).load().unwrap();

        assert_eq!(store.get("DEFAULT", "name"), Some("svc"));
        assert_eq!(store.get("mysql", "url"), Some("mysql://localhost"));
    }

    #[test]
    fn test_file_layer_required_missing() {
        let result = FileLayer::new("/nonexistent/path/config.toml", true).load();

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_file_layer_optional_missing() {
        let store = FileLayer::new("/nonexistent/path/config.toml", false)
            .load()
            .unwrap();

        assert!(store.is_empty());
    }

    #[test]
    fn test_file_layer_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "url = mysql://unquoted").unwrap();

        let result = FileLayer::new(file.path(), true).load();

        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_file_layer_unreadable_path() {
        let dir = tempfile::tempdir().unwrap();

        let result = FileLayer::new(dir.path(), false).load();

        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_file_layer_rejects_arrays() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]").unwrap();
        writeln!(file, "hosts = [\"a\", \"b\"]").unwrap();

        let result = FileLayer::new(file.path(), true).load();

        assert!(matches!(result, Err(ConfigError::NonScalarValue(path)) if path == "server.hosts"));
    }
}
