//! Populates annotated structures from sectioned key-value configuration.
//!
//! Structures are declared with [`bindable!`]; each leaf field reads one
//! `(section, key)` pair from a [`ConfigSource`], coerced into the field's
//! type. [`Config`] loads a [`Store`] from TOML files and the environment.

pub mod bind;
pub mod config;
mod error;

pub use bind::{
    bind, dump, BindError, Bindable, Binder, CoerceError, Field, FieldDescriptor, FieldMeta,
    Kind, NameResolver, Observer, SilentObserver, Target, TracingObserver, Value, View,
};
pub use config::{Config, ConfigError, ConfigSource, Store, DEFAULT_SECTION};
pub use error::Error;
