use alloc::borrow::Cow;
use core::fmt;

use crate::bean::{Bean, BeanKind, Capability};
use crate::ops::List;

// -----------------------------------------------------------------------------
// Segment

/// One step of a property path.
///
/// A segment always names a property; it may additionally address an
/// element of the named value by position (`hosts[2]`) or an entry by key
/// (`limits(max)`).
///
/// # Examples
///
/// ```
/// use beanpath::{segments, Segment};
///
/// let parsed: Vec<Segment> = segments("a.b[2].c(key)")
///     .map(|result| result.unwrap().segment)
///     .collect();
///
/// assert_eq!(parsed.len(), 3);
/// assert_eq!(parsed[0], Segment::Name("a".into()));
/// assert_eq!(parsed[1], Segment::Index { name: "b".into(), index: 2 });
/// assert_eq!(parsed[2], Segment::Key { name: "c".into(), key: "key".into() });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment<'a> {
    /// A plain named property: `name`.
    Name(Cow<'a, str>),
    /// An element of the named list: `name[index]`.
    Index {
        /// The property holding the list.
        name: Cow<'a, str>,
        /// The element position.
        index: usize,
    },
    /// An entry of the named map: `name(key)`.
    Key {
        /// The property holding the map.
        name: Cow<'a, str>,
        /// The entry key, verbatim.
        key: Cow<'a, str>,
    },
}

impl Segment<'_> {
    /// Returns the property name this segment starts from.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Segment::Name(name) => name,
            Segment::Index { name, .. } | Segment::Key { name, .. } => name,
        }
    }

    /// Converts this segment into one that owns its strings.
    pub fn into_owned(self) -> Segment<'static> {
        match self {
            Segment::Name(name) => Segment::Name(Cow::Owned(name.into_owned())),
            Segment::Index { name, index } => Segment::Index {
                name: Cow::Owned(name.into_owned()),
                index,
            },
            Segment::Key { name, key } => Segment::Key {
                name: Cow::Owned(name.into_owned()),
                key: Cow::Owned(key.into_owned()),
            },
        }
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Name(name) => f.write_str(name),
            Segment::Index { name, index } => write!(f, "{name}[{index}]"),
            Segment::Key { name, key } => write!(f, "{name}({key})"),
        }
    }
}

// -----------------------------------------------------------------------------
// OffsetSegment

/// A [`Segment`] paired with its byte offset in the source path string.
///
/// The offset only feeds error messages; application behavior is identical
/// to the bare segment's.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OffsetSegment<'a> {
    /// The segment itself.
    pub segment: Segment<'a>,
    /// Byte offset of the segment's first character in the parsed path.
    pub offset: usize,
}

impl<'a> OffsetSegment<'a> {
    /// Creates an offset segment.
    #[inline]
    pub const fn new(segment: Segment<'a>, offset: usize) -> Self {
        OffsetSegment { segment, offset }
    }

    /// Converts this into one that owns its strings.
    #[inline]
    pub fn into_owned(self) -> OffsetSegment<'static> {
        OffsetSegment {
            segment: self.segment.into_owned(),
            offset: self.offset,
        }
    }

    /// Resolves this segment against `base`, returning the addressed value.
    #[inline]
    pub fn apply<'r>(&self, base: &'r dyn Bean) -> Result<&'r dyn Bean, AccessError> {
        self.segment.apply(base, self.offset)
    }

    /// Resolves this segment against `base`, returning the addressed value
    /// mutably.
    #[inline]
    pub fn apply_mut<'r>(&self, base: &'r mut dyn Bean) -> Result<&'r mut dyn Bean, AccessError> {
        self.segment.apply_mut(base, self.offset)
    }
}

impl<'a> From<Segment<'a>> for OffsetSegment<'a> {
    #[inline]
    fn from(segment: Segment<'a>) -> Self {
        OffsetSegment::new(segment, 0)
    }
}

impl fmt::Display for OffsetSegment<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.segment, f)
    }
}

// -----------------------------------------------------------------------------
// Access errors

/// The kind of an [`AccessError`], with kind-specific detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessErrorKind {
    /// The segment named nothing resolvable on the value.
    NotFound {
        /// The kind of the value that was searched.
        container: BeanKind,
    },
    /// The segment was applied to an absent (`None`) value.
    Absent,
    /// The value lacks the capability the segment demands.
    NoCapability {
        /// The capability the segment needs.
        required: Capability,
        /// The kind of the value that lacks it.
        actual: BeanKind,
    },
    /// An index segment addressed past the end of a list.
    OutOfRange {
        /// The requested position.
        index: usize,
        /// The list length at resolution time.
        len: usize,
    },
    /// A write supplied a value of a type the slot cannot hold.
    Incompatible {
        /// The type the slot holds.
        expected: &'static str,
        /// The type that was supplied.
        actual: &'static str,
    },
}

/// An error from applying a path segment to a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessError {
    kind: AccessErrorKind,
    segment: Segment<'static>,
    offset: usize,
}

impl AccessError {
    pub(crate) fn new(kind: AccessErrorKind, segment: &Segment<'_>, offset: usize) -> Self {
        AccessError {
            kind,
            segment: segment.clone().into_owned(),
            offset,
        }
    }

    /// Returns what went wrong.
    #[inline]
    pub fn kind(&self) -> &AccessErrorKind {
        &self.kind
    }

    /// Returns the segment that failed to apply.
    #[inline]
    pub fn segment(&self) -> &Segment<'static> {
        &self.segment
    }

    /// Returns the byte offset of the failing segment in its path.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot resolve `{}` (offset {}): ", self.segment, self.offset)?;
        match &self.kind {
            AccessErrorKind::NotFound { container } => match &self.segment {
                Segment::Key { key, .. } => {
                    write!(f, "the map has no entry `{key}`")
                }
                segment => write!(
                    f,
                    "the {container} value has no property or entry `{}`",
                    segment.name()
                ),
            },
            AccessErrorKind::Absent => f.write_str("the value is absent (`None`)"),
            AccessErrorKind::NoCapability { required, actual } => {
                write!(f, "expected a value with {required} access, found a {actual} value")
            }
            AccessErrorKind::OutOfRange { index, len } => {
                write!(f, "index {index} is out of range for a list of length {len}")
            }
            AccessErrorKind::Incompatible { expected, actual } => {
                write!(f, "cannot place a `{actual}` into a `{expected}` slot")
            }
        }
    }
}

impl core::error::Error for AccessError {}

// -----------------------------------------------------------------------------
// Segment application

impl Segment<'_> {
    /// Resolves this segment against `base`; `offset` feeds error messages.
    pub fn apply<'r>(&self, base: &'r dyn Bean, offset: usize) -> Result<&'r dyn Bean, AccessError> {
        let fail = |kind| AccessError::new(kind, self, offset);
        if base.is_absent() {
            return Err(fail(AccessErrorKind::Absent));
        }
        match self {
            Segment::Name(name) => step_name(base, name).map_err(fail),
            Segment::Index { name, index } => {
                let container = step_name(base, name).map_err(&fail)?;
                if container.is_absent() {
                    return Err(fail(AccessErrorKind::Absent));
                }
                let list = container.as_list().ok_or_else(|| {
                    fail(AccessErrorKind::NoCapability {
                        required: Capability::Index,
                        actual: container.kind(),
                    })
                })?;
                element_at(list, *index).map_err(fail)
            }
            Segment::Key { name, key } => {
                let container = step_name(base, name).map_err(&fail)?;
                if container.is_absent() {
                    return Err(fail(AccessErrorKind::Absent));
                }
                let map = container.as_map().ok_or_else(|| {
                    fail(AccessErrorKind::NoCapability {
                        required: Capability::Key,
                        actual: container.kind(),
                    })
                })?;
                map.entry(key).ok_or_else(|| {
                    fail(AccessErrorKind::NotFound {
                        container: container.kind(),
                    })
                })
            }
        }
    }

    /// Resolves this segment against `base` mutably; `offset` feeds error
    /// messages.
    pub fn apply_mut<'r>(
        &self,
        base: &'r mut dyn Bean,
        offset: usize,
    ) -> Result<&'r mut dyn Bean, AccessError> {
        if base.is_absent() {
            return Err(AccessError::new(AccessErrorKind::Absent, self, offset));
        }
        let result = match self {
            Segment::Name(name) => step_name_mut(base, name),
            Segment::Index { name, index } => {
                step_name_mut(base, name).and_then(|container| element_mut_at(container, *index))
            }
            Segment::Key { name, key } => {
                step_name_mut(base, name).and_then(|container| entry_mut_at(container, key))
            }
        };
        result.map_err(|kind| AccessError::new(kind, self, offset))
    }
}

/// Resolves a plain name against a value, applying the capability
/// precedence rule: declared named property, else keyed entry, else (for
/// all-digit names) list element.
pub(crate) fn step_name<'r>(
    base: &'r dyn Bean,
    name: &str,
) -> Result<&'r dyn Bean, AccessErrorKind> {
    if let Some(props) = base.as_props() {
        if let Some(value) = props.property(name) {
            return Ok(value);
        }
    }
    if let Some(map) = base.as_map() {
        if let Some(value) = map.entry(name) {
            return Ok(value);
        }
    }
    if let Some(list) = base.as_list() {
        if let Some(index) = parse_index(name) {
            return element_at(list, index);
        }
    }
    Err(AccessErrorKind::NotFound {
        container: base.kind(),
    })
}

/// Mutable form of [`step_name`], same precedence.
pub(crate) fn step_name_mut<'r>(
    base: &'r mut dyn Bean,
    name: &str,
) -> Result<&'r mut dyn Bean, AccessErrorKind> {
    // Decide the route with shared borrows first; conditional returns of a
    // mutable borrow would otherwise pin `base` for the whole function.
    enum Route {
        Property,
        Entry,
        Element(usize),
    }

    let container = base.kind();
    let route = if base.as_props().is_some_and(|props| props.property(name).is_some()) {
        Route::Property
    } else if base.as_map().is_some_and(|map| map.entry(name).is_some()) {
        Route::Entry
    } else if let (Some(list), Some(index)) = (base.as_list(), parse_index(name)) {
        if index >= list.len() {
            return Err(AccessErrorKind::OutOfRange {
                index,
                len: list.len(),
            });
        }
        Route::Element(index)
    } else {
        return Err(AccessErrorKind::NotFound { container });
    };

    let missing = AccessErrorKind::NotFound { container };
    match route {
        Route::Property => base
            .as_props_mut()
            .and_then(|props| props.property_mut(name))
            .ok_or(missing),
        Route::Entry => base
            .as_map_mut()
            .and_then(|map| map.entry_mut(name))
            .ok_or(missing),
        Route::Element(index) => base
            .as_list_mut()
            .and_then(|list| list.element_mut(index))
            .ok_or(missing),
    }
}

fn element_at(list: &dyn List, index: usize) -> Result<&dyn Bean, AccessErrorKind> {
    list.element(index).ok_or(AccessErrorKind::OutOfRange {
        index,
        len: list.len(),
    })
}

fn element_mut_at<'r>(
    container: &'r mut dyn Bean,
    index: usize,
) -> Result<&'r mut dyn Bean, AccessErrorKind> {
    if container.is_absent() {
        return Err(AccessErrorKind::Absent);
    }
    let kind = container.kind();
    let list = container
        .as_list_mut()
        .ok_or(AccessErrorKind::NoCapability {
            required: Capability::Index,
            actual: kind,
        })?;
    let len = list.len();
    list.element_mut(index)
        .ok_or(AccessErrorKind::OutOfRange { index, len })
}

fn entry_mut_at<'r>(
    container: &'r mut dyn Bean,
    key: &str,
) -> Result<&'r mut dyn Bean, AccessErrorKind> {
    if container.is_absent() {
        return Err(AccessErrorKind::Absent);
    }
    let kind = container.kind();
    let map = container.as_map_mut().ok_or(AccessErrorKind::NoCapability {
        required: Capability::Key,
        actual: kind,
    })?;
    map.entry_mut(key)
        .ok_or(AccessErrorKind::NotFound { container: kind })
}

/// Parses an all-digit name as a list index. Signs, leading `+`, and
/// non-ASCII digits do not qualify.
pub(crate) fn parse_index(name: &str) -> Option<usize> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

// -----------------------------------------------------------------------------
// Tests
