//! Registration macros.
//!
//! These stand in for run-time field enumeration: each invocation generates
//! the explicit (name, getter, setter) table for one type, once, at compile
//! time.

// -----------------------------------------------------------------------------
// Opaque leaf values

/// Implements [`Bean`](crate::Bean) for a leaf value type.
///
/// The type takes part in property graphs with no capabilities of its own:
/// it can be read, written, debugged through its `Debug`, and converted
/// through its `Display` text. Requires `Debug + Display + Send + Sync +
/// 'static`.
///
/// Append `, serde` to also expose the value to
/// [`BeanSerializer`](crate::serde::BeanSerializer) through its
/// `Serialize` implementation (only meaningful with the `serde` feature).
///
/// # Examples
///
/// ```
/// use beanpath::impl_bean_opaque;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Celsius(f64);
///
/// impl core::fmt::Display for Celsius {
///     fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
///         write!(f, "{}", self.0)
///     }
/// }
///
/// impl_bean_opaque!(Celsius);
///
/// use beanpath::Bean;
/// let c = Celsius(21.5);
/// assert_eq!(c.kind(), beanpath::BeanKind::Opaque);
/// assert!(c.as_display().is_some());
/// ```
#[macro_export]
macro_rules! impl_bean_opaque {
    ($ty:ty) => {
        $crate::__impl_bean_opaque!($ty {});
    };
    ($ty:ty, serde) => {
        $crate::__impl_bean_opaque!($ty {
            #[cfg(feature = "serde")]
            #[inline]
            fn as_serialize(
                &self,
            ) -> ::core::option::Option<&dyn $crate::__private::erased_serde::Serialize> {
                ::core::option::Option::Some(self)
            }
        });
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __impl_bean_opaque {
    ($ty:ty { $($extra:item)* }) => {
        #[allow(unused_qualifications)]
        impl $crate::Bean for $ty {
            #[inline]
            fn kind(&self) -> $crate::BeanKind {
                $crate::BeanKind::Opaque
            }

            fn assign(
                &mut self,
                value: $crate::alloc::boxed::Box<dyn $crate::Bean>,
            ) -> ::core::result::Result<(), $crate::alloc::boxed::Box<dyn $crate::Bean>> {
                *self = value.take::<Self>()?;
                ::core::result::Result::Ok(())
            }

            #[inline]
            fn as_display(&self) -> ::core::option::Option<&dyn ::core::fmt::Display> {
                ::core::option::Option::Some(self)
            }

            fn debug_value(
                &self,
                f: &mut ::core::fmt::Formatter<'_>,
            ) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }

            $($extra)*
        }
    };
}

// -----------------------------------------------------------------------------
// Structs with named fields

/// Implements [`Bean`](crate::Bean) and [`Properties`](crate::Properties)
/// for a struct with named fields.
///
/// List every field that should be visible as a property, in the order
/// introspection should report them. Each listed field's type must itself
/// implement `Bean`. Fields left out are simply not properties.
///
/// # Examples
///
/// ```
/// use beanpath::{bean_struct, get_as};
///
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// bean_struct!(Server { host, port });
///
/// let server = Server { host: "localhost".into(), port: 8080 };
/// assert_eq!(get_as::<u16>(&server, "port").unwrap(), &8080);
/// ```
#[macro_export]
macro_rules! bean_struct {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        #[allow(unused_qualifications)]
        impl $crate::Bean for $ty {
            #[inline]
            fn kind(&self) -> $crate::BeanKind {
                $crate::BeanKind::Struct
            }

            fn assign(
                &mut self,
                value: $crate::alloc::boxed::Box<dyn $crate::Bean>,
            ) -> ::core::result::Result<(), $crate::alloc::boxed::Box<dyn $crate::Bean>> {
                *self = value.take::<Self>()?;
                ::core::result::Result::Ok(())
            }

            #[inline]
            fn as_props(&self) -> ::core::option::Option<&dyn $crate::Properties> {
                ::core::option::Option::Some(self)
            }

            #[inline]
            fn as_props_mut(&mut self) -> ::core::option::Option<&mut dyn $crate::Properties> {
                ::core::option::Option::Some(self)
            }

            fn debug_value(
                &self,
                f: &mut ::core::fmt::Formatter<'_>,
            ) -> ::core::fmt::Result {
                $crate::impls::props_debug(self, f)
            }
        }

        #[allow(unused_qualifications)]
        impl $crate::Properties for $ty {
            fn property(&self, name: &str) -> ::core::option::Option<&dyn $crate::Bean> {
                $(
                    if name == stringify!($field) {
                        return ::core::option::Option::Some(&self.$field as &dyn $crate::Bean);
                    }
                )+
                ::core::option::Option::None
            }

            fn property_mut(
                &mut self,
                name: &str,
            ) -> ::core::option::Option<&mut dyn $crate::Bean> {
                $(
                    if name == stringify!($field) {
                        return ::core::option::Option::Some(
                            &mut self.$field as &mut dyn $crate::Bean,
                        );
                    }
                )+
                ::core::option::Option::None
            }

            fn property_at(&self, index: usize) -> ::core::option::Option<&dyn $crate::Bean> {
                let mut remaining = index;
                $(
                    if remaining == 0 {
                        return ::core::option::Option::Some(&self.$field as &dyn $crate::Bean);
                    }
                    remaining -= 1;
                )+
                let _ = remaining;
                ::core::option::Option::None
            }

            fn name_at(&self, index: usize) -> ::core::option::Option<&str> {
                const NAMES: &[&str] = &[$(stringify!($field)),+];
                NAMES.get(index).copied()
            }

            #[inline]
            fn property_len(&self) -> usize {
                const LEN: usize = [$(stringify!($field)),+].len();
                LEN
            }

            #[inline]
            fn properties(&self) -> $crate::PropertyIter<'_> {
                $crate::PropertyIter::new(self)
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;

    use crate::{Bean, BeanKind, Properties};

    struct Account {
        id: u64,
        owner: String,
        active: bool,
    }

    bean_struct!(Account { id, owner, active });

    fn account() -> Account {
        Account {
            id: 7,
            owner: String::from("Ada"),
            active: true,
        }
    }

    #[test]
    fn generated_property_table() {
        let account = account();
        assert_eq!(account.kind(), BeanKind::Struct);
        assert_eq!(account.property_len(), 3);
        assert_eq!(account.name_at(0), Some("id"));
        assert_eq!(account.name_at(2), Some("active"));
        assert!(account.name_at(3).is_none());
        assert!(account.property("missing").is_none());
        assert!(account.property_at(3).is_none());

        let props: &dyn Properties = &account;
        assert_eq!(props.property_as::<String>("owner").unwrap(), "Ada");
    }

    #[test]
    fn generated_setter_goes_through_property_mut() {
        let mut account = account();
        let props: &mut dyn Properties = &mut account;
        *props.property_mut_as::<bool>("active").unwrap() = false;
        assert!(!account.active);
    }

    #[test]
    fn generated_debug_walks_fields() {
        let rendered = format!("{:?}", account().as_bean());
        assert_eq!(rendered, "Account { id: 7, owner: \"Ada\", active: true }");
    }
}
