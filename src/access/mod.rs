//! Path parsing and property resolution.
//!
//! Two complementary APIs:
//!
//! - The free functions [`get`], [`get_as`], [`get_mut`], [`set`],
//!   [`set_boxed`], and [`set_converted`] parse the path on every call.
//!   Right for one-off lookups.
//! - [`PropertyPath`] parses once and resolves many times. Right when a
//!   path is applied repeatedly.
//!
//! # Syntax
//!
//! A path is `segment ('.' segment)*`. Each segment names a property and
//! may carry exactly one suffix:
//!
//! - `name`: named property; on maps, the entry of that key; on lists,
//!   all-digit names address elements
//! - `name[index]`: element `index` of the list held by `name`
//! - `name(key)`: entry `key` of the map held by `name`
//!
//! Names must be non-empty and cannot contain `. [ ] ( )`; whitespace is
//! significant. Keys run to the closing parenthesis and may contain
//! anything else, dots included.
//!
//! # Resolution rules
//!
//! Segments apply left to right. A simple name prefers the declared named
//! property, then the keyed entry, then (for all-digit names) the list
//! element. Absent (`None`) intermediates and missing properties are hard
//! errors; nothing is created implicitly. `set` writes only at the final
//! segment. The single exception to "nothing is created" is a keyed write
//! to a map, which inserts the entry when it is missing.
//!
//! # Examples
//!
//! ```
//! use beanpath::{bean_struct, get_as, set};
//!
//! struct Host { name: String, port: u16 }
//! struct Cluster { hosts: Vec<Host> }
//! bean_struct!(Host { name, port });
//! bean_struct!(Cluster { hosts });
//!
//! let mut cluster = Cluster {
//!     hosts: vec![Host { name: "alpha".into(), port: 7000 }],
//! };
//!
//! assert_eq!(get_as::<u16>(&cluster, "hosts[0].port").unwrap(), &7000);
//! set(&mut cluster, "hosts[0].port", 7001_u16).unwrap();
//! assert_eq!(cluster.hosts[0].port, 7001);
//! ```

// -----------------------------------------------------------------------------
// Modules

mod parse;
mod path;
mod resolve;
mod segment;

// -----------------------------------------------------------------------------
// Exports

pub use parse::{segments, ParseError, SegmentIter};
pub use path::PropertyPath;
pub use resolve::{
    get, get_as, get_mut, get_mut_as, set, set_boxed, set_converted, PathError,
};
pub use segment::{AccessError, AccessErrorKind, OffsetSegment, Segment};
