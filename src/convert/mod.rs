//! Type conversion between textual and typed property values.
//!
//! A [`ConverterRegistry`] maps a target type to a [`Converter`] rule.
//! Registration overwrites: the most recently registered rule for a type
//! wins. Looking up an unregistered target falls back to identity: the
//! source value passes through unchanged when it already has the target
//! type, and anything else is [`ConvertError::Unsupported`].
//!
//! [`ConverterRegistry::new`] pre-registers rules for `bool`, `char`, the
//! integer widths, `f32`/`f64`, and `String`. These parse the source
//! value's `Display` text ([`Bean::as_display`]) with `FromStr`, so the
//! canonical formats are locale-independent; conversions are deterministic
//! and side-effect-free.
//!
//! With the `std` feature, a process-wide registry lives behind
//! [`global()`]: registration takes the write lock, conversion the read
//! lock. With `auto_register`, converters submitted via
//! [`register_converter!`](crate::register_converter) are folded into every
//! `ConverterRegistry::new()`.
//!
//! # Examples
//!
//! ```
//! use beanpath::convert::ConverterRegistry;
//!
//! let registry = ConverterRegistry::new();
//!
//! let port: u16 = registry.convert_to(Box::new(String::from("8080"))).unwrap();
//! assert_eq!(port, 8080);
//!
//! let yes: bool = registry.convert_to(Box::new(String::from("Yes"))).unwrap();
//! assert!(yes);
//! ```
//!
//! [`Bean::as_display`]: crate::Bean::as_display

// -----------------------------------------------------------------------------
// Modules

mod error;
mod registry;
mod standard;

#[cfg(feature = "std")]
mod global;

// -----------------------------------------------------------------------------
// Exports

pub use error::ConvertError;
pub use registry::{Converter, ConverterRegistry};

#[cfg(feature = "auto_register")]
pub use registry::ConverterEntry;

#[cfg(feature = "std")]
pub use global::{convert_to, global, register, unregister};
