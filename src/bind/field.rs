//! Field descriptors and the typed slots the binder writes into.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use super::name::NameResolver;

/// The declared type of a field, as seen by the binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Struct,
    String,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Bool,
    Array,
    Indirection,
    Complex64,
    Complex128,
}

impl Kind {
    /// Returns `true` for kinds a leaf field may be coerced into.
    pub fn is_supported(self) -> bool {
        match self {
            Kind::String
            | Kind::I8
            | Kind::I16
            | Kind::I32
            | Kind::I64
            | Kind::F32
            | Kind::F64
            | Kind::Bool => true,
            Kind::Struct | Kind::Array | Kind::Indirection | Kind::Complex64 | Kind::Complex128 => {
                false
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Struct => "struct",
            Kind::String => "string",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Bool => "bool",
            Kind::Array => "array",
            Kind::Indirection => "indirection",
            Kind::Complex64 => "complex64",
            Kind::Complex128 => "complex128",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coerced leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Bool(bool),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Str(_) => Kind::String,
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::Bool(_) => Kind::Bool,
        }
    }
}

/// Renders the value in a form [`coerce`](super::coerce) parses back.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::I8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
        }
    }
}

/// A mutable reference to a supported leaf field.
#[derive(Debug)]
pub enum Slot<'a> {
    Str(&'a mut String),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Bool(&'a mut bool),
}

impl Slot<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Slot::Str(_) => Kind::String,
            Slot::I8(_) => Kind::I8,
            Slot::I16(_) => Kind::I16,
            Slot::I32(_) => Kind::I32,
            Slot::I64(_) => Kind::I64,
            Slot::F32(_) => Kind::F32,
            Slot::F64(_) => Kind::F64,
            Slot::Bool(_) => Kind::Bool,
        }
    }

    /// Writes `value` into the field.
    ///
    /// Returns the value back if its kind does not match the slot.
    pub fn assign(self, value: Value) -> Result<(), Value> {
        match (self, value) {
            (Slot::Str(slot), Value::Str(v)) => *slot = v,
            (Slot::I8(slot), Value::I8(v)) => *slot = v,
            (Slot::I16(slot), Value::I16(v)) => *slot = v,
            (Slot::I32(slot), Value::I32(v)) => *slot = v,
            (Slot::I64(slot), Value::I64(v)) => *slot = v,
            (Slot::F32(slot), Value::F32(v)) => *slot = v,
            (Slot::F64(slot), Value::F64(v)) => *slot = v,
            (Slot::Bool(slot), Value::Bool(v)) => *slot = v,
            (_, value) => return Err(value),
        }
        Ok(())
    }
}

/// What a field looks like to the binder.
pub enum Target<'a> {
    Nested(&'a mut dyn Bindable),
    Leaf(Slot<'a>),
    Unsupported(Kind),
}

/// Read-only counterpart of [`Target`], used when dumping.
pub enum View<'a> {
    Nested(&'a dyn Bindable),
    Leaf(Value),
    Unsupported(Kind),
}

/// A type that can appear as a field of a [`Bindable`] structure.
///
/// Implemented for the supported leaf types, for the rejected array and
/// indirection types, and by [`bindable!`](crate::bindable) for every
/// generated structure.
pub trait Field {
    fn target(&mut self) -> Target<'_>;
    fn view(&self) -> View<'_>;
}

/// A structure whose fields can be bound from a [`ConfigSource`](crate::ConfigSource).
///
/// Normally implemented with the [`bindable!`](crate::bindable) macro.
pub trait Bindable {
    /// Fields in declaration order, with mutable access.
    fn fields_mut(&mut self) -> Vec<(FieldDescriptor, Target<'_>)>;

    /// Fields in declaration order, read-only.
    fn fields(&self) -> Vec<(FieldDescriptor, View<'_>)>;
}

macro_rules! leaf_field {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Field for $ty {
                fn target(&mut self) -> Target<'_> {
                    Target::Leaf(Slot::$variant(self))
                }

                fn view(&self) -> View<'_> {
                    View::Leaf(Value::$variant(self.clone()))
                }
            }
        )*
    };
}

leaf_field! {
    String => Str,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    bool => Bool,
}

macro_rules! unsupported_field {
    ($kind:ident: $($ty:ty),* $(,)?) => {
        $(
            impl<T> Field for $ty {
                fn target(&mut self) -> Target<'_> {
                    Target::Unsupported(Kind::$kind)
                }

                fn view(&self) -> View<'_> {
                    View::Unsupported(Kind::$kind)
                }
            }
        )*
    };
}

unsupported_field!(Indirection: Box<T>, Rc<T>, Arc<T>, Option<Box<T>>);
unsupported_field!(Array: Vec<T>);

impl<T, const N: usize> Field for [T; N] {
    fn target(&mut self) -> Target<'_> {
        Target::Unsupported(Kind::Array)
    }

    fn view(&self) -> View<'_> {
        View::Unsupported(Kind::Array)
    }
}

/// Per-field annotations.
///
/// Built by [`bindable!`](crate::bindable) from `#[bind(...)]`; every entry is
/// optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldMeta {
    pub section: Option<&'static str>,
    pub key: Option<&'static str>,
    pub default: Option<&'static str>,
    pub omit: bool,
}

impl FieldMeta {
    pub const fn new() -> Self {
        Self {
            section: None,
            key: None,
            default: None,
            omit: false,
        }
    }

    pub const fn section(mut self, section: &'static str) -> Self {
        self.section = Some(section);
        self
    }

    pub const fn key(mut self, key: &'static str) -> Self {
        self.key = Some(key);
        self
    }

    /// Literal used when the key is missing from the source.
    ///
    /// Set by `default = "..."` in `#[bind(...)]`.
    pub const fn default_literal(mut self, literal: &'static str) -> Self {
        self.default = Some(literal);
        self
    }

    /// Allows the field to keep its current value when the key is missing
    /// or does not parse.
    pub const fn omit(mut self, omit: bool) -> Self {
        self.omit = omit;
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::new()
    }
}

/// Name and annotations of one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub meta: FieldMeta,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, meta: FieldMeta) -> Self {
        Self { name, meta }
    }

    /// Resolves the (section, key) pair this field reads from.
    pub fn location(&self, default_section: &str, names: &NameResolver) -> Location {
        Location {
            section: self.meta.section.unwrap_or(default_section).to_string(),
            key: match self.meta.key {
                Some(key) => key.to_string(),
                None => names.resolve(self.name),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub section: String,
    pub key: String,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.section, self.key)
    }
}
