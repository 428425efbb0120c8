/// Declares a structure and implements [`Bindable`](crate::Bindable) for it.
///
/// Leaf fields take an optional `#[bind(...)]` attribute with any of
/// `section`, `key`, `default` and `omit`. Fields whose type was itself
/// declared with `bindable!` are recursed into and must not carry the
/// attribute. Doc comments on fields go before `#[bind(...)]`.
///
/// ```
/// use confbind::{bindable, Binder, Store};
///
/// bindable! {
///     #[derive(Debug, Default)]
///     pub struct Exchange {
///         #[bind(section = "exchange")]
///         pub access_key: String,
///         /// Off unless set.
///         #[bind(section = "exchange", default = "false")]
///         pub enable_private_signature: bool,
///     }
/// }
///
/// let mut store = Store::new();
/// store.insert("exchange", "access-key", "abc");
///
/// let mut exchange = Exchange::default();
/// Binder::new(&store).bind(&mut exchange)?;
/// assert_eq!(exchange.access_key, "abc");
/// assert!(!exchange.enable_private_signature);
/// # Ok::<(), confbind::BindError>(())
/// ```
#[macro_export]
macro_rules! bindable {
    (@meta $meta:expr $(,)?) => {
        $meta
    };
    (@meta $meta:expr, default = $value:expr $(, $($rest:tt)*)?) => {
        $crate::bindable!(@meta $meta.default_literal($value) $(, $($rest)*)?)
    };
    (@meta $meta:expr, $name:ident = $value:expr $(, $($rest:tt)*)?) => {
        $crate::bindable!(@meta $meta.$name($value) $(, $($rest)*)?)
    };
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[doc = $doc:literal])*
                $(#[bind($($meta:ident = $value:expr),* $(,)?)])?
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$attr])*
        $vis struct $name {
            $(
                $(#[doc = $doc])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Bindable for $name {
            fn fields_mut(
                &mut self,
            ) -> ::std::vec::Vec<($crate::FieldDescriptor, $crate::Target<'_>)> {
                ::std::vec![
                    $(
                        (
                            $crate::FieldDescriptor::new(
                                ::core::stringify!($field),
                                $crate::bindable!(
                                    @meta $crate::FieldMeta::new() $($(, $meta = $value)*)?
                                ),
                            ),
                            $crate::Field::target(&mut self.$field),
                        ),
                    )*
                ]
            }

            fn fields(&self) -> ::std::vec::Vec<($crate::FieldDescriptor, $crate::View<'_>)> {
                ::std::vec![
                    $(
                        (
                            $crate::FieldDescriptor::new(
                                ::core::stringify!($field),
                                $crate::bindable!(
                                    @meta $crate::FieldMeta::new() $($(, $meta = $value)*)?
                                ),
                            ),
                            $crate::Field::view(&self.$field),
                        ),
                    )*
                ]
            }
        }

        impl $crate::Field for $name {
            fn target(&mut self) -> $crate::Target<'_> {
                $crate::Target::Nested(self)
            }

            fn view(&self) -> $crate::View<'_> {
                $crate::View::Nested(self)
            }
        }
    };
}
