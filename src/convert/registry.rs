use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::any::TypeId;

use crate::bean::Bean;
use crate::convert::ConvertError;

// -----------------------------------------------------------------------------
// Converter

/// A conversion rule producing one target type from arbitrary sources.
///
/// Rules must be deterministic and free of side effects. Any
/// `Fn(&dyn Bean) -> Result<Box<dyn Bean>, ConvertError> + Send + Sync`
/// qualifies, so closures and function pointers register directly.
pub trait Converter: Send + Sync {
    /// Converts `value` into the rule's target type.
    fn convert(&self, value: &dyn Bean) -> Result<Box<dyn Bean>, ConvertError>;
}

impl<F> Converter for F
where
    F: Fn(&dyn Bean) -> Result<Box<dyn Bean>, ConvertError> + Send + Sync,
{
    #[inline]
    fn convert(&self, value: &dyn Bean) -> Result<Box<dyn Bean>, ConvertError> {
        self(value)
    }
}

// -----------------------------------------------------------------------------
// ConverterRegistry

struct Rule {
    target_name: &'static str,
    converter: Box<dyn Converter>,
}

/// A table of conversion rules keyed by target type.
///
/// Registration is last-wins per exact target type. Lookup of an
/// unregistered target falls back to identity pass-through when the source
/// already has the target type, and fails otherwise.
///
/// # Examples
///
/// ```
/// use beanpath::convert::{ConvertError, ConverterRegistry};
/// use beanpath::Bean;
///
/// let mut registry = ConverterRegistry::empty();
///
/// // Unregistered target, matching source: pass-through.
/// let n: i64 = registry.convert_to(Box::new(41_i64)).unwrap();
/// assert_eq!(n, 41);
///
/// // Registered rules win over pass-through.
/// registry.register::<i64>(|value: &dyn Bean| {
///     match value.downcast_ref::<i64>() {
///         Some(n) => Ok((n + 1).into_boxed_bean()),
///         None => Err(ConvertError::Unsupported {
///             from: value.type_name(),
///             to: "i64",
///         }),
///     }
/// });
/// let n: i64 = registry.convert_to(Box::new(41_i64)).unwrap();
/// assert_eq!(n, 42);
/// ```
pub struct ConverterRegistry {
    rules: BTreeMap<TypeId, Rule>,
}

impl Default for ConverterRegistry {
    /// See [`ConverterRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterRegistry {
    /// Creates a registry with no rules at all.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Creates a registry with the standard rules pre-registered:
    ///
    /// - `bool` `char`
    /// - `u8`-`u128`, `usize`
    /// - `i8`-`i128`, `isize`
    /// - `f32` `f64`
    /// - `String`
    ///
    /// With the `auto_register` feature, converters submitted through
    /// [`register_converter!`](crate::register_converter) are registered on
    /// top, overriding standard rules for the same target.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        crate::convert::standard::install(&mut registry);
        #[cfg(feature = "auto_register")]
        for entry in inventory::iter::<ConverterEntry> {
            registry.rules.insert(
                (entry.target)(),
                Rule {
                    target_name: (entry.target_name)(),
                    converter: Box::new(entry.rule),
                },
            );
        }
        registry
    }

    /// Registers `rule` for target type `T`, replacing any previous rule
    /// for exactly that type.
    pub fn register<T: Bean>(&mut self, rule: impl Converter + 'static) {
        self.rules.insert(
            TypeId::of::<T>(),
            Rule {
                target_name: core::any::type_name::<T>(),
                converter: Box::new(rule),
            },
        );
    }

    /// Removes the rule for target type `T`, returning whether one was
    /// registered.
    pub fn unregister<T: Bean>(&mut self) -> bool {
        self.rules.remove(&TypeId::of::<T>()).is_some()
    }

    /// Returns whether a rule is registered for target type `T`.
    #[inline]
    pub fn is_registered<T: Bean>(&self) -> bool {
        self.rules.contains_key(&TypeId::of::<T>())
    }

    /// Converts `value` to type `T`.
    ///
    /// A registered rule is always invoked, even when the source already
    /// has the target type; without one, a matching source passes through
    /// unchanged and anything else is [`ConvertError::Unsupported`].
    pub fn convert_to<T: Bean>(&self, value: Box<dyn Bean>) -> Result<T, ConvertError> {
        let target_name = core::any::type_name::<T>();
        let converted = self.convert_boxed(TypeId::of::<T>(), target_name, value)?;
        converted.take::<T>().map_err(|other| ConvertError::Invalid {
            to: target_name,
            detail: alloc::format!("rule produced a `{}` instead", other.type_name()).into(),
        })
    }

    /// Converts `value` to the type of the value occupying `slot`.
    ///
    /// This is the lookup conversion-aware writes use: the slot's own type
    /// is the conversion target.
    #[inline]
    pub fn convert_for_slot(
        &self,
        slot: &dyn Bean,
        value: Box<dyn Bean>,
    ) -> Result<Box<dyn Bean>, ConvertError> {
        self.convert_boxed(slot.ty_id(), slot.type_name(), value)
    }

    /// Converts `value` to the target type identified by `target`;
    /// `target_name` feeds error messages.
    pub fn convert_boxed(
        &self,
        target: TypeId,
        target_name: &'static str,
        value: Box<dyn Bean>,
    ) -> Result<Box<dyn Bean>, ConvertError> {
        match self.rules.get(&target) {
            Some(rule) => rule.converter.convert(&*value),
            None if value.ty_id() == target => Ok(value),
            None => Err(ConvertError::Unsupported {
                from: value.type_name(),
                to: target_name,
            }),
        }
    }

    /// Returns the registered target-type names, for diagnostics.
    pub fn registered_targets(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.values().map(|rule| rule.target_name)
    }
}

// -----------------------------------------------------------------------------
// Auto-registration

/// A converter submitted for collection via
/// [`register_converter!`](crate::register_converter).
#[cfg(feature = "auto_register")]
pub struct ConverterEntry {
    target: fn() -> TypeId,
    target_name: fn() -> &'static str,
    rule: fn(&dyn Bean) -> Result<Box<dyn Bean>, ConvertError>,
}

#[cfg(feature = "auto_register")]
impl ConverterEntry {
    /// Creates an entry converting to `T` with `rule`.
    pub const fn new<T: Bean>(rule: fn(&dyn Bean) -> Result<Box<dyn Bean>, ConvertError>) -> Self {
        ConverterEntry {
            target: TypeId::of::<T>,
            target_name: core::any::type_name::<T>,
            rule,
        }
    }
}

#[cfg(feature = "auto_register")]
inventory::collect!(ConverterEntry);

/// Submits a converter for collection into every
/// [`ConverterRegistry::new`].
///
/// The rule must be a `fn(&dyn Bean) -> Result<Box<dyn Bean>,
/// ConvertError>` function item. Requires the `auto_register` feature.
///
/// # Examples
///
/// ```
/// use beanpath::convert::{ConvertError, ConverterRegistry};
/// use beanpath::{register_converter, Bean};
///
/// #[derive(Debug, PartialEq)]
/// struct Flag(bool);
/// beanpath::impl_bean_opaque!(Flag);
///
/// impl core::fmt::Display for Flag {
///     fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
///         write!(f, "{}", self.0)
///     }
/// }
///
/// fn flag_from_bool(value: &dyn Bean) -> Result<Box<dyn Bean>, ConvertError> {
///     match value.downcast_ref::<bool>() {
///         Some(&b) => Ok(Flag(b).into_boxed_bean()),
///         None => Err(ConvertError::Unsupported { from: value.type_name(), to: "Flag" }),
///     }
/// }
///
/// register_converter!(Flag, flag_from_bool);
///
/// let registry = ConverterRegistry::new();
/// let flag: Flag = registry.convert_to(Box::new(true)).unwrap();
/// assert_eq!(flag, Flag(true));
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! register_converter {
    ($ty:ty, $rule:expr) => {
        $crate::__private::inventory::submit! {
            $crate::convert::ConverterEntry::new::<$ty>($rule)
        }
    };
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use super::ConverterRegistry;
    use crate::convert::ConvertError;
    use crate::Bean;

    #[test]
    fn unregistered_matching_source_passes_through_unchanged() {
        let registry = ConverterRegistry::empty();
        let value: u128 = registry.convert_to(Box::new(9_u128)).unwrap();
        assert_eq!(value, 9);
    }

    #[test]
    fn unregistered_mismatched_source_is_unsupported() {
        let registry = ConverterRegistry::empty();
        let error = registry.convert_to::<u128>(Box::new(9_u64)).unwrap_err();
        assert_eq!(
            error,
            ConvertError::Unsupported {
                from: core::any::type_name::<u64>(),
                to: core::any::type_name::<u128>(),
            }
        );
    }

    #[test]
    fn last_registered_rule_wins() {
        let mut registry = ConverterRegistry::empty();
        registry.register::<i64>(|_: &dyn Bean| Ok(1_i64.into_boxed_bean()));
        registry.register::<i64>(|_: &dyn Bean| Ok(2_i64.into_boxed_bean()));

        let value: i64 = registry.convert_to(Box::new(String::new())).unwrap();
        assert_eq!(value, 2);
    }

    #[test]
    fn registered_rule_is_invoked_even_for_matching_sources() {
        let mut registry = ConverterRegistry::empty();
        registry.register::<i64>(|value: &dyn Bean| {
            let doubled = value.downcast_ref::<i64>().map_or(0, |n| n * 2);
            Ok(doubled.into_boxed_bean())
        });

        let value: i64 = registry.convert_to(Box::new(21_i64)).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn unregister_restores_the_fallback() {
        let mut registry = ConverterRegistry::empty();
        registry.register::<i64>(|_: &dyn Bean| Ok(0_i64.into_boxed_bean()));
        assert!(registry.is_registered::<i64>());

        assert!(registry.unregister::<i64>());
        assert!(!registry.unregister::<i64>());

        let value: i64 = registry.convert_to(Box::new(5_i64)).unwrap();
        assert_eq!(value, 5);
    }

    #[test]
    fn misbehaving_rules_are_reported() {
        let mut registry = ConverterRegistry::empty();
        registry.register::<i64>(|_: &dyn Bean| Ok(String::from("wrong").into_boxed_bean()));

        let error = registry.convert_to::<i64>(Box::new(0_i64)).unwrap_err();
        assert!(matches!(error, ConvertError::Invalid { .. }));
    }

    #[cfg(feature = "auto_register")]
    mod auto {
        use alloc::boxed::Box;
        use core::fmt;

        use super::super::ConverterRegistry;
        use crate::convert::ConvertError;
        use crate::{impl_bean_opaque, register_converter, Bean};

        #[derive(Debug, PartialEq)]
        struct Upper(char);

        impl fmt::Display for Upper {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl_bean_opaque!(Upper);

        fn upper_from_char(value: &dyn Bean) -> Result<Box<dyn Bean>, ConvertError> {
            match value.downcast_ref::<char>() {
                Some(&c) => Ok(Upper(c.to_ascii_uppercase()).into_boxed_bean()),
                None => Err(ConvertError::Unsupported {
                    from: value.type_name(),
                    to: core::any::type_name::<Upper>(),
                }),
            }
        }

        register_converter!(Upper, upper_from_char);

        #[test]
        fn submitted_converters_reach_fresh_registries() {
            let registry = ConverterRegistry::new();
            let upper: Upper = registry.convert_to(Box::new('q')).unwrap();
            assert_eq!(upper, Upper('Q'));
        }
    }
}
