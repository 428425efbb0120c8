//! Recursive population of [`Bindable`] structures from a [`ConfigSource`].

use crate::config::{ConfigSource, Store};

use super::coerce::coerce;
use super::error::BindError;
use super::field::{Bindable, FieldDescriptor, Location, Slot, Target, View};
use super::name::NameResolver;
use super::observer::{Observer, TracingObserver};

/// Binds structures against one source.
///
/// ```
/// use confbind::{bindable, Binder, SilentObserver, Store};
///
/// bindable! {
///     #[derive(Default)]
///     struct Server {
///         #[bind(section = "server")]
///         port: i32,
///     }
/// }
///
/// let mut store = Store::new();
/// store.insert("server", "port", "8080");
///
/// let mut server = Server::default();
/// Binder::new(&store)
///     .with_observer(&SilentObserver)
///     .bind(&mut server)?;
/// assert_eq!(server.port, 8080);
/// # Ok::<(), confbind::BindError>(())
/// ```
#[must_use = "a binder does nothing until .bind() is called"]
pub struct Binder<'a, S: ConfigSource + ?Sized> {
    source: &'a S,
    observer: &'a dyn Observer,
    names: NameResolver,
}

impl<'a, S: ConfigSource + ?Sized> Binder<'a, S> {
    /// Creates a binder that reports problems through [`TracingObserver`].
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            observer: &TracingObserver,
            names: NameResolver::default(),
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn Observer) -> Self {
        self.observer = observer;
        self
    }

    /// Overrides how keys are derived from field names without a `key`.
    pub fn with_names(mut self, names: NameResolver) -> Self {
        self.names = names;
        self
    }

    /// Populates `target` field by field, in declaration order.
    ///
    /// Stops at the first failure. Fields assigned before it keep their
    /// new values.
    pub fn bind<T: Bindable>(&self, target: &mut T) -> Result<(), BindError> {
        self.bind_struct(target, "")
    }

    fn bind_struct(&self, structure: &mut dyn Bindable, prefix: &str) -> Result<(), BindError> {
        for (field, target) in structure.fields_mut() {
            let path = field_path(prefix, field.name);
            match target {
                Target::Nested(nested) => {
                    if !field.meta.is_empty() {
                        return Err(BindError::NestedMetadata { field: path });
                    }
                    self.bind_struct(nested, &path)?;
                }
                Target::Unsupported(kind) => {
                    return Err(BindError::UnsupportedKind { field: path, kind });
                }
                Target::Leaf(slot) => self.bind_leaf(&field, slot, &path)?,
            }
        }
        Ok(())
    }

    fn bind_leaf(
        &self,
        field: &FieldDescriptor,
        slot: Slot<'_>,
        path: &str,
    ) -> Result<(), BindError> {
        let kind = slot.kind();
        let Location { section, key } =
            field.location(self.source.default_section(), &self.names);

        let raw = match self.source.get_value(&section, &key) {
            Some(raw) => raw,
            None => {
                self.observer.key_missing(path, &section, &key);
                if field.meta.omit {
                    tracing::debug!(field = path, %section, %key, "omitted missing key");
                    return Ok(());
                }
                match field.meta.default {
                    Some(literal) => literal,
                    None => {
                        return Err(BindError::MissingKey {
                            field: path.to_string(),
                            section,
                            key,
                        })
                    }
                }
            }
        };

        let value = match coerce(raw, kind) {
            Ok(value) => value,
            Err(error) => {
                self.observer.coercion_failed(path, &section, &key, &error);
                if field.meta.omit {
                    return Ok(());
                }
                return Err(BindError::Coercion {
                    field: path.to_string(),
                    section,
                    key,
                    source: error,
                });
            }
        };

        slot.assign(value).map_err(|value| BindError::KindMismatch {
            field: path.to_string(),
            expected: kind,
            found: value.kind(),
        })
    }
}

/// Binds `target` from `source` with the default observer and key naming.
pub fn bind<T, S>(target: &mut T, source: &S) -> Result<(), BindError>
where
    T: Bindable,
    S: ConfigSource + ?Sized,
{
    Binder::new(source).bind(target)
}

/// Writes every leaf of `target` into a new [`Store`], at the location
/// binding would read it from.
///
/// Values are stored verbatim. Call [`Store::escaped`] before writing the
/// store to a file that [`Config`](crate::Config) loads, so `$` in values is
/// not read as a reference.
pub fn dump<T: Bindable>(target: &T) -> Result<Store, BindError> {
    dump_with(target, crate::DEFAULT_SECTION, &NameResolver::default())
}

/// Like [`dump`], with an explicit default section and key naming.
pub fn dump_with<T: Bindable>(
    target: &T,
    default_section: &str,
    names: &NameResolver,
) -> Result<Store, BindError> {
    let mut store = Store::new();
    dump_struct(target, "", default_section, names, &mut store)?;
    Ok(store)
}

fn dump_struct(
    structure: &dyn Bindable,
    prefix: &str,
    default_section: &str,
    names: &NameResolver,
    store: &mut Store,
) -> Result<(), BindError> {
    for (field, view) in structure.fields() {
        let path = field_path(prefix, field.name);
        match view {
            View::Nested(nested) => {
                if !field.meta.is_empty() {
                    return Err(BindError::NestedMetadata { field: path });
                }
                dump_struct(nested, &path, default_section, names, store)?;
            }
            View::Unsupported(kind) => {
                return Err(BindError::UnsupportedKind { field: path, kind });
            }
            View::Leaf(value) => {
                let Location { section, key } = field.location(default_section, names);
                store.insert(section, key, value.to_string());
            }
        }
    }
    Ok(())
}

fn field_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}
