//! Declarative binding of structures from sectioned key-value sources.

mod binder;
mod coerce;
mod error;
mod field;
mod macros;
mod name;
mod observer;

pub use binder::{bind, dump, dump_with, Binder};
pub use coerce::coerce;
pub use error::{BindError, CoerceError};
pub use field::{
    Bindable, Field, FieldDescriptor, FieldMeta, Kind, Location, Slot, Target, Value, View,
};
pub use name::{resolve, NameResolver, DEFAULT_SEPARATOR};
pub use observer::{Observer, SilentObserver, TracingObserver};
