use alloc::boxed::Box;
use core::fmt;

use crate::bean::BeanKind;
use crate::ops::{List, Map, Properties};
use crate::Bean;

// -----------------------------------------------------------------------------
// Option
//
// `Option` is the null-like value of the property model. `Some(v)` is
// transparent: every capability delegates to `v`. `None` reads as absent,
// which makes applying a further path segment to it a resolution error.

impl<T: Bean> Bean for Option<T> {
    fn kind(&self) -> BeanKind {
        match self {
            Some(value) => value.kind(),
            None => BeanKind::Opaque,
        }
    }

    /// Accepts either an `Option<T>` (replacing the slot wholesale) or a
    /// bare `T` (wrapped in `Some`), so optional properties stay writable
    /// without the caller spelling out the optionality.
    fn assign(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
        let value = match value.take::<Option<T>>() {
            Ok(replacement) => {
                *self = replacement;
                return Ok(());
            }
            Err(value) => value,
        };
        *self = Some(value.take::<T>()?);
        Ok(())
    }

    #[inline]
    fn is_absent(&self) -> bool {
        self.is_none()
    }

    #[inline]
    fn as_props(&self) -> Option<&dyn Properties> {
        self.as_ref().and_then(Bean::as_props)
    }

    #[inline]
    fn as_props_mut(&mut self) -> Option<&mut dyn Properties> {
        self.as_mut().and_then(Bean::as_props_mut)
    }

    #[inline]
    fn as_list(&self) -> Option<&dyn List> {
        self.as_ref().and_then(Bean::as_list)
    }

    #[inline]
    fn as_list_mut(&mut self) -> Option<&mut dyn List> {
        self.as_mut().and_then(Bean::as_list_mut)
    }

    #[inline]
    fn as_map(&self) -> Option<&dyn Map> {
        self.as_ref().and_then(Bean::as_map)
    }

    #[inline]
    fn as_map_mut(&mut self) -> Option<&mut dyn Map> {
        self.as_mut().and_then(Bean::as_map_mut)
    }

    #[inline]
    fn as_display(&self) -> Option<&dyn fmt::Display> {
        self.as_ref().and_then(Bean::as_display)
    }

    #[cfg(feature = "serde")]
    #[inline]
    fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
        self.as_ref().and_then(Bean::as_serialize)
    }

    fn debug_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => {
                f.write_str("Some(")?;
                value.debug_value(f)?;
                f.write_str(")")
            }
            None => f.write_str("None"),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
