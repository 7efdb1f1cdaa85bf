//! [`Bean`] implementations for standard types, plus the helpers the
//! registration macros expand to.
//!
//! Covered out of the box:
//!
//! - opaque leaves: `bool`, `char`, all integer widths, `f32`/`f64`,
//!   `String`, `&'static str`, `Cow<'static, str>`
//! - lists: `Vec<T>`, `[T; N]`
//! - maps: `BTreeMap<String, V>`, and `HashMap<String, V>` with the `std`
//!   feature
//! - `Option<T>`: the null-like value; capabilities delegate to the inner
//!   value and `None` reads as absent
//!
//! User types join with [`bean_struct!`] (named-field structs) and
//! [`impl_bean_opaque!`] (leaf values with `Debug + Display`).
//!
//! [`Bean`]: crate::Bean
//! [`bean_struct!`]: crate::bean_struct
//! [`impl_bean_opaque!`]: crate::impl_bean_opaque

// -----------------------------------------------------------------------------
// Modules

mod debug;
mod macros;

mod list;
mod map;
mod option;
mod scalar;
mod string;

// -----------------------------------------------------------------------------
// Exports

pub use debug::{list_debug, map_debug, props_debug};
