use core::fmt;

// -----------------------------------------------------------------------------
// BeanKind

/// The primary shape of a value, as reported by [`Bean::kind`].
///
/// This is diagnostic vocabulary: resolution itself dispatches on the
/// capability accessors ([`Bean::as_props`], [`Bean::as_list`],
/// [`Bean::as_map`]), not on this enum, so a value whose type exposes
/// several capabilities still has exactly one kind for error messages.
///
/// [`Bean::kind`]: crate::Bean::kind
/// [`Bean::as_props`]: crate::Bean::as_props
/// [`Bean::as_list`]: crate::Bean::as_list
/// [`Bean::as_map`]: crate::Bean::as_map
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BeanKind {
    /// A value with declared named properties.
    Struct,
    /// An ordered, index-addressable container.
    List,
    /// A string-keyed container.
    Map,
    /// A leaf value with no capabilities.
    Opaque,
}

impl fmt::Display for BeanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BeanKind::Struct => "struct",
            BeanKind::List => "list",
            BeanKind::Map => "map",
            BeanKind::Opaque => "leaf",
        })
    }
}

// -----------------------------------------------------------------------------
// Capability

/// One of the three access patterns a path segment can demand of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Access to a declared named property.
    Property,
    /// Access to an element by position.
    Index,
    /// Access to an entry by string key.
    Key,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Capability::Property => "named-property",
            Capability::Index => "indexed-element",
            Capability::Key => "keyed-entry",
        })
    }
}
