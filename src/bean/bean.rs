use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::bean::BeanKind;
use crate::ops::{List, Map, Properties};

// -----------------------------------------------------------------------------
// Bean

/// The foundational trait for dynamic property access.
///
/// Every value that participates in path resolution implements `Bean`:
/// scalars and strings as opaque leaves, containers and user structs with
/// one or more *capabilities* on top. A capability is surfaced through the
/// corresponding accessor:
///
/// - [`as_props`]: the value has declared named properties ([`Properties`]).
/// - [`as_list`]: the value has index-addressable elements ([`List`]).
/// - [`as_map`]: the value has string-keyed entries ([`Map`]).
///
/// The accessors are independent. A type may expose several capabilities at
/// once (a configuration bean that is both a struct and a key-value bag, for
/// example); path resolution prefers named properties over keyed entries
/// over indexed elements when more than one could answer.
///
/// # Implementing
///
/// Hand implementations are rarely needed. Use [`bean_struct!`] for structs
/// with named fields and [`impl_bean_opaque!`] for leaf values; `Vec`,
/// arrays, string-keyed maps, `Option`, and the primitive types are covered
/// by this crate.
///
/// # Examples
///
/// ```
/// use beanpath::{bean_struct, Bean, BeanKind};
///
/// struct Point { x: i64, y: i64 }
/// bean_struct!(Point { x, y });
///
/// let p = Point { x: 1, y: 2 };
/// assert_eq!(p.kind(), BeanKind::Struct);
/// assert!(p.as_props().is_some());
/// assert!(p.as_list().is_none());
/// ```
///
/// [`as_props`]: Bean::as_props
/// [`as_list`]: Bean::as_list
/// [`as_map`]: Bean::as_map
/// [`Properties`]: crate::Properties
/// [`List`]: crate::List
/// [`Map`]: crate::Map
/// [`bean_struct!`]: crate::bean_struct
/// [`impl_bean_opaque!`]: crate::impl_bean_opaque
pub trait Bean: Any + Send + Sync {
    /// Returns the primary shape of this value, used in error messages.
    fn kind(&self) -> BeanKind;

    /// Replaces this value with `value`.
    ///
    /// Fails with the rejected box when `value` does not hold a type this
    /// slot accepts; the slot is left unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use beanpath::Bean;
    ///
    /// let mut x = 1_i64;
    /// x.assign(Box::new(5_i64)).unwrap();
    /// assert_eq!(x, 5);
    ///
    /// assert!(x.assign(Box::new("five")).is_err());
    /// assert_eq!(x, 5);
    /// ```
    fn assign(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>>;

    /// Returns the name of the underlying type.
    #[inline]
    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Returns the [`TypeId`] of the underlying type.
    ///
    /// `Any::type_id` on a `Box<dyn Bean>` reports the id of the container,
    /// not the boxed value, which is a classic trap; this method always
    /// reports the underlying value.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns `true` when this value is null-like (`Option::None`).
    ///
    /// Applying a further path segment to an absent value is a hard
    /// resolution error, never an implicit creation.
    #[inline]
    fn is_absent(&self) -> bool {
        false
    }

    /// Named-property capability, if this value has one.
    #[inline]
    fn as_props(&self) -> Option<&dyn Properties> {
        None
    }

    /// Mutable named-property capability, if this value has one.
    #[inline]
    fn as_props_mut(&mut self) -> Option<&mut dyn Properties> {
        None
    }

    /// Indexed-element capability, if this value has one.
    #[inline]
    fn as_list(&self) -> Option<&dyn List> {
        None
    }

    /// Mutable indexed-element capability, if this value has one.
    #[inline]
    fn as_list_mut(&mut self) -> Option<&mut dyn List> {
        None
    }

    /// Keyed-entry capability, if this value has one.
    #[inline]
    fn as_map(&self) -> Option<&dyn Map> {
        None
    }

    /// Mutable keyed-entry capability, if this value has one.
    #[inline]
    fn as_map_mut(&mut self) -> Option<&mut dyn Map> {
        None
    }

    /// A `Display` view of this value, if it has a canonical text form.
    ///
    /// The standard converters read source values through this method, so
    /// opaque types registered with the `display` behavior convert to any
    /// `FromStr` target out of the box.
    #[inline]
    fn as_display(&self) -> Option<&dyn fmt::Display> {
        None
    }

    /// An erased `Serialize` view of this leaf value.
    ///
    /// Container kinds are serialized structurally by
    /// [`BeanSerializer`](crate::serde::BeanSerializer) and do not need to
    /// override this.
    #[cfg(feature = "serde")]
    #[inline]
    fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
        None
    }

    /// Writes a debug rendering of this value.
    ///
    /// This powers `Debug` for `dyn Bean`; implementations generated by the
    /// registration macros delegate to the type's own `Debug`.
    fn debug_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.type_name())
    }

    /// Casts this value to `&dyn Bean`.
    #[inline]
    fn as_bean(&self) -> &dyn Bean
    where
        Self: Sized,
    {
        self
    }

    /// Casts this value to `&mut dyn Bean`.
    #[inline]
    fn as_bean_mut(&mut self) -> &mut dyn Bean
    where
        Self: Sized,
    {
        self
    }

    /// Casts a boxed value to `Box<dyn Bean>`.
    #[inline]
    fn into_bean(self: Box<Self>) -> Box<dyn Bean>
    where
        Self: Sized,
    {
        self
    }

    /// Boxes this value as a `Box<dyn Bean>`.
    #[inline]
    fn into_boxed_bean(self) -> Box<dyn Bean>
    where
        Self: Sized,
    {
        Box::new(self)
    }
}

// -----------------------------------------------------------------------------
// Downcasting

impl dyn Bean {
    /// Returns `true` if the underlying value is of type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use beanpath::Bean;
    ///
    /// let x: Box<dyn Bean> = 10_i64.into_boxed_bean();
    /// assert!(x.is::<i64>());
    /// assert!(!x.is::<u64>());
    /// ```
    #[inline]
    pub fn is<T: Bean>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts to `T` by reference, or `None` on a type mismatch.
    ///
    /// # Examples
    ///
    /// ```
    /// use beanpath::Bean;
    ///
    /// let x: Box<dyn Bean> = 10_i64.into_boxed_bean();
    /// assert_eq!(x.downcast_ref::<i64>(), Some(&10));
    /// ```
    #[inline]
    pub fn downcast_ref<T: Bean>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts to `T` by mutable reference, or `None` on a type mismatch.
    #[inline]
    pub fn downcast_mut<T: Bean>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the box to `Box<T>`, returning it unchanged on a mismatch.
    #[inline]
    pub fn downcast<T: Bean>(self: Box<dyn Bean>) -> Result<Box<T>, Box<dyn Bean>> {
        if self.is::<T>() {
            #[expect(unsafe_code, reason = "type checked just above")]
            let value = unsafe { <Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() };
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// Downcasts and unboxes to `T`, returning the box unchanged on a
    /// mismatch.
    ///
    /// # Examples
    ///
    /// ```
    /// use beanpath::Bean;
    ///
    /// let x: Box<dyn Bean> = 10_i64.into_boxed_bean();
    /// assert_eq!(x.take::<i64>().unwrap(), 10);
    /// ```
    #[inline]
    pub fn take<T: Bean>(self: Box<dyn Bean>) -> Result<T, Box<dyn Bean>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Bean {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.debug_value(f)
    }
}

// -----------------------------------------------------------------------------
// Tests
