#![doc = include_str!("../README.md")]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

#[doc(hidden)]
pub extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod bean;

pub mod impls;
pub mod ops;

pub mod access;
pub mod convert;
pub mod introspect;

#[cfg(feature = "serde")]
pub mod serde;

// -----------------------------------------------------------------------------
// Macro support

#[doc(hidden)]
pub mod __private {
    #[cfg(feature = "serde")]
    pub use erased_serde;

    #[cfg(feature = "auto_register")]
    pub use inventory;
}

// -----------------------------------------------------------------------------
// Top-level exports

pub use bean::{Bean, BeanKind, Capability};

pub use access::{
    get, get_as, get_mut, get_mut_as, segments, set, set_boxed, set_converted, AccessError,
    AccessErrorKind, OffsetSegment, ParseError, PathError, PropertyPath, Segment, SegmentIter,
};

pub use convert::{ConvertError, Converter, ConverterRegistry};

pub use introspect::{
    suppress_properties, Introspection, Introspector, PropertySet, SuppressProperties,
};

pub use ops::{DynaBean, List, ListIter, Map, Properties, PropertyIter};
