use std::path::Path;

use super::env::EnvLayer;
use super::file::FileLayer;
use super::resolve::{resolve_references, unescape};
use super::source::Layer;
use super::{ConfigError, Store};
use crate::bind::{Bindable, Binder};
use crate::Error;

/// Builder for loading configuration from TOML files and the environment.
///
/// Layers are merged in registration order, with later layers overriding
/// earlier ones key by key.
///
/// ## Variable References
///
/// Values can reference other values with `${key}` (default section) or
/// `${section.key}`:
///
/// ```toml
/// host = "localhost"
///
/// [server]
/// port = 8080
/// url = "http://${host}:${server.port}/api"
/// ```
///
/// Use `$$` to escape a literal `$` (e.g., `$${VAR}` becomes `${VAR}`).
///
/// ## Example
///
/// ```no_run
/// use confbind::{bindable, Config};
///
/// bindable! {
///     #[derive(Default)]
///     struct Server {
///         #[bind(section = "server")]
///         port: i32,
///     }
/// }
///
/// let server: Server = Config::builder()
///     .with_file("config/default.toml", true)
///     .with_env("MYAPP", "__")
///     .with_file("config/local.toml", false)
///     .load()?;
/// # Ok::<(), confbind::Error>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() or .load() is called"]
pub struct Config {
    layers: Vec<Box<dyn Layer>>,
}

impl Config {
    /// Creates a new configuration builder.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Adds a TOML file to be loaded.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_layer(FileLayer::new(path, required))
    }

    /// Adds the environment variables starting with `prefix` and `separator`.
    ///
    /// See [`EnvLayer`] for how variable names map to sections and keys.
    pub fn with_env(self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.with_layer(EnvLayer::new(prefix, separator))
    }

    pub fn with_layer(mut self, layer: impl Layer + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Loads and merges every layer, then expands references.
    pub fn build(self) -> Result<Store, ConfigError> {
        let mut merged = Store::new();
        for layer in &self.layers {
            merged.merge(layer.load()?);
        }

        resolve_references(&mut merged)?;
        unescape(&mut merged);

        tracing::debug!(layers = self.layers.len(), keys = merged.len(), "configuration built");
        Ok(merged)
    }

    /// Builds the store and binds a default-constructed `T` from it.
    pub fn load<T: Bindable + Default>(self) -> Result<T, Error> {
        let store = self.build()?;
        let mut target = T::default();
        Binder::new(&store).bind(&mut target)?;
        Ok(target)
    }
}

impl Layer for Store {
    fn load(&self) -> Result<Store, ConfigError> {
        Ok(self.clone())
    }
}
