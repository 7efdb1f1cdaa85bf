use alloc::boxed::Box;
use core::fmt;

use crate::access::parse::{segments, ParseError};
use crate::access::segment::{parse_index, step_name_mut};
use crate::access::{AccessError, AccessErrorKind, OffsetSegment, Segment};
use crate::bean::{Bean, Capability};
use crate::convert::{ConvertError, ConverterRegistry};
use crate::ops::Map;

// -----------------------------------------------------------------------------
// PathError

/// An error from a full path resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError<'a> {
    /// The path string could not be parsed.
    Parse(ParseError<'a>),
    /// A segment could not be applied to the graph.
    Access(AccessError),
    /// A conversion-aware write could not convert the supplied value.
    Convert(ConvertError),
    /// The resolved value does not hold the requested type.
    Downcast {
        /// The requested type.
        expected: &'static str,
    },
}

impl fmt::Display for PathError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::Parse(error) => fmt::Display::fmt(error, f),
            PathError::Access(error) => fmt::Display::fmt(error, f),
            PathError::Convert(error) => fmt::Display::fmt(error, f),
            PathError::Downcast { expected } => {
                write!(f, "the resolved value is not a `{expected}`")
            }
        }
    }
}

impl core::error::Error for PathError<'_> {}

impl<'a> From<ParseError<'a>> for PathError<'a> {
    #[inline]
    fn from(error: ParseError<'a>) -> Self {
        PathError::Parse(error)
    }
}

impl From<AccessError> for PathError<'_> {
    #[inline]
    fn from(error: AccessError) -> Self {
        PathError::Access(error)
    }
}

impl From<ConvertError> for PathError<'_> {
    #[inline]
    fn from(error: ConvertError) -> Self {
        PathError::Convert(error)
    }
}

// -----------------------------------------------------------------------------
// Reads

/// Resolves `path` against `root` and returns the addressed value.
///
/// The path is parsed lazily; for repeated resolution of the same path,
/// parse once into a [`PropertyPath`](crate::PropertyPath).
///
/// # Examples
///
/// ```
/// use beanpath::{bean_struct, get};
///
/// struct Address { city: String }
/// struct Person { address: Address }
/// bean_struct!(Address { city });
/// bean_struct!(Person { address });
///
/// let person = Person { address: Address { city: "Rome".into() } };
/// let value = get(&person, "address.city").unwrap();
/// assert_eq!(value.downcast_ref::<String>().unwrap(), "Rome");
/// ```
pub fn get<'r, 'p>(root: &'r dyn Bean, path: &'p str) -> Result<&'r dyn Bean, PathError<'p>> {
    let mut current = root;
    for result in segments(path) {
        let segment = result?;
        current = segment.apply(current)?;
    }
    Ok(current)
}

/// Resolves `path` against `root` and returns the addressed value mutably.
pub fn get_mut<'r, 'p>(
    root: &'r mut dyn Bean,
    path: &'p str,
) -> Result<&'r mut dyn Bean, PathError<'p>> {
    let mut current = root;
    for result in segments(path) {
        let segment = result?;
        current = segment.apply_mut(current)?;
    }
    Ok(current)
}

/// Resolves `path` against `root` and returns the addressed value typed.
///
/// # Examples
///
/// ```
/// use beanpath::get_as;
///
/// let values = vec![vec![1_i64, 2], vec![3]];
/// assert_eq!(get_as::<i64>(&values, "0.1").unwrap(), &2);
/// ```
pub fn get_as<'r, 'p, T: Bean>(root: &'r dyn Bean, path: &'p str) -> Result<&'r T, PathError<'p>> {
    get(root, path)?
        .downcast_ref::<T>()
        .ok_or(PathError::Downcast {
            expected: core::any::type_name::<T>(),
        })
}

/// Resolves `path` against `root` and returns the addressed value typed and
/// mutable.
pub fn get_mut_as<'r, 'p, T: Bean>(
    root: &'r mut dyn Bean,
    path: &'p str,
) -> Result<&'r mut T, PathError<'p>> {
    get_mut(root, path)?
        .downcast_mut::<T>()
        .ok_or(PathError::Downcast {
            expected: core::any::type_name::<T>(),
        })
}

// -----------------------------------------------------------------------------
// Writes

/// Sets the value addressed by `path` to `value`.
///
/// Every non-final segment must already resolve; missing intermediates are
/// an error, never created. The write itself goes through the declared
/// named property when there is one, creates or replaces a keyed entry when
/// the target is a map, or replaces an in-range list element. A failure at
/// any point leaves the graph unchanged.
///
/// # Examples
///
/// ```
/// use beanpath::{bean_struct, set};
///
/// struct Address { city: String }
/// bean_struct!(Address { city });
///
/// let mut address = Address { city: "Rome".into() };
/// set(&mut address, "city", String::from("Milan")).unwrap();
/// assert_eq!(address.city, "Milan");
/// ```
#[inline]
pub fn set<'p, V: Bean>(
    root: &mut dyn Bean,
    path: &'p str,
    value: V,
) -> Result<(), PathError<'p>> {
    set_boxed(root, path, Box::new(value))
}

/// Sets the value addressed by `path` to an already-boxed `value`.
#[inline]
pub fn set_boxed<'p>(
    root: &mut dyn Bean,
    path: &'p str,
    value: Box<dyn Bean>,
) -> Result<(), PathError<'p>> {
    set_impl(root, path, value, None)
}

/// Sets the value addressed by `path`, converting `value` through
/// `registry` when the slot rejects it as-is.
///
/// The conversion target is the resolved slot's own type (or a map's value
/// type when inserting a keyed entry), so textual values flow into typed
/// slots:
///
/// ```
/// use beanpath::convert::ConverterRegistry;
/// use beanpath::{bean_struct, set_converted};
///
/// struct Server { port: u16 }
/// bean_struct!(Server { port });
///
/// let registry = ConverterRegistry::new();
/// let mut server = Server { port: 0 };
/// set_converted(&registry, &mut server, "port", Box::new(String::from("8080"))).unwrap();
/// assert_eq!(server.port, 8080);
/// ```
#[inline]
pub fn set_converted<'p>(
    registry: &ConverterRegistry,
    root: &mut dyn Bean,
    path: &'p str,
    value: Box<dyn Bean>,
) -> Result<(), PathError<'p>> {
    set_impl(root, path, value, Some(registry))
}

fn set_impl<'p>(
    root: &mut dyn Bean,
    path: &'p str,
    value: Box<dyn Bean>,
    registry: Option<&ConverterRegistry>,
) -> Result<(), PathError<'p>> {
    let mut current = root;
    let mut pending: Option<OffsetSegment<'p>> = None;
    for result in segments(path) {
        let segment = result?;
        if let Some(previous) = pending.take() {
            current = previous.apply_mut(current)?;
        }
        pending = Some(segment);
    }
    let Some(last) = pending else {
        // The parser reports empty paths itself; this is unreachable in
        // practice but kept as an error rather than a panic.
        return Err(PathError::Parse(ParseError {
            offset: 0,
            path,
            message: "empty property path",
        }));
    };
    assign_final(current, &last, value, registry)
}

// Applies the final segment of a `set`: the only point a write happens.
pub(crate) fn assign_final(
    target: &mut dyn Bean,
    segment: &OffsetSegment<'_>,
    value: Box<dyn Bean>,
    registry: Option<&ConverterRegistry>,
) -> Result<(), PathError<'static>> {
    let offset = segment.offset;
    let segment = &segment.segment;
    let fail = |kind| PathError::Access(AccessError::new(kind, segment, offset));

    if target.is_absent() {
        return Err(fail(AccessErrorKind::Absent));
    }

    match segment {
        Segment::Name(name) => {
            // Same precedence as reads, except that a map target accepts
            // writes to keys it does not contain yet.
            enum Route {
                Property,
                MapInsert,
                Element(usize),
            }

            let container = target.kind();
            let route = if target
                .as_props()
                .is_some_and(|props| props.property(name).is_some())
            {
                Route::Property
            } else if target.as_map().is_some() {
                Route::MapInsert
            } else if let (Some(list), Some(index)) = (target.as_list(), parse_index(name)) {
                if index >= list.len() {
                    return Err(fail(AccessErrorKind::OutOfRange {
                        index,
                        len: list.len(),
                    }));
                }
                Route::Element(index)
            } else {
                return Err(fail(AccessErrorKind::NotFound { container }));
            };

            match route {
                Route::Property => {
                    let slot = target
                        .as_props_mut()
                        .and_then(|props| props.property_mut(name))
                        .ok_or_else(|| fail(AccessErrorKind::NotFound { container }))?;
                    assign_slot(slot, value, registry, segment, offset)
                }
                Route::MapInsert => {
                    let map = target.as_map_mut().ok_or_else(|| {
                        fail(AccessErrorKind::NoCapability {
                            required: Capability::Key,
                            actual: container,
                        })
                    })?;
                    insert_entry_converted(map, name, value, registry, segment, offset)
                }
                Route::Element(index) => {
                    let slot = target
                        .as_list_mut()
                        .and_then(|list| list.element_mut(index))
                        .ok_or_else(|| fail(AccessErrorKind::NotFound { container }))?;
                    assign_slot(slot, value, registry, segment, offset)
                }
            }
        }
        Segment::Index { name, index } => {
            let container = step_name_mut(target, name).map_err(fail)?;
            if container.is_absent() {
                return Err(fail(AccessErrorKind::Absent));
            }
            let kind = container.kind();
            let list = container.as_list_mut().ok_or_else(|| {
                fail(AccessErrorKind::NoCapability {
                    required: Capability::Index,
                    actual: kind,
                })
            })?;
            let len = list.len();
            if *index >= len {
                return Err(fail(AccessErrorKind::OutOfRange { index: *index, len }));
            }
            let slot = list
                .element_mut(*index)
                .ok_or_else(|| fail(AccessErrorKind::NotFound { container: kind }))?;
            assign_slot(slot, value, registry, segment, offset)
        }
        Segment::Key { name, key } => {
            let container = step_name_mut(target, name).map_err(fail)?;
            if container.is_absent() {
                return Err(fail(AccessErrorKind::Absent));
            }
            let kind = container.kind();
            let map = container.as_map_mut().ok_or_else(|| {
                fail(AccessErrorKind::NoCapability {
                    required: Capability::Key,
                    actual: kind,
                })
            })?;
            insert_entry_converted(map, key, value, registry, segment, offset)
        }
    }
}

// Writes through an occupied slot, converting on rejection when a registry
// is available.
fn assign_slot(
    slot: &mut dyn Bean,
    value: Box<dyn Bean>,
    registry: Option<&ConverterRegistry>,
    segment: &Segment<'_>,
    offset: usize,
) -> Result<(), PathError<'static>> {
    let expected = slot.type_name();
    let rejected = match slot.assign(value) {
        Ok(()) => return Ok(()),
        Err(rejected) => rejected,
    };
    let Some(registry) = registry else {
        return Err(incompatible(expected, &*rejected, segment, offset));
    };
    let converted = registry.convert_for_slot(&*slot, rejected)?;
    slot.assign(converted)
        .map_err(|still_rejected| incompatible(expected, &*still_rejected, segment, offset))
}

// Inserts a keyed entry, converting to the map's value type on rejection
// when a registry is available.
fn insert_entry_converted(
    map: &mut dyn Map,
    key: &str,
    value: Box<dyn Bean>,
    registry: Option<&ConverterRegistry>,
    segment: &Segment<'_>,
    offset: usize,
) -> Result<(), PathError<'static>> {
    let rejected = match map.insert_entry(key, value) {
        Ok(_) => return Ok(()),
        Err(rejected) => rejected,
    };
    let expected = map.value_type_name();
    let Some(registry) = registry else {
        return Err(incompatible(expected, &*rejected, segment, offset));
    };
    let converted = registry.convert_boxed(map.value_type_id(), expected, rejected)?;
    match map.insert_entry(key, converted) {
        Ok(_) => Ok(()),
        Err(still_rejected) => Err(incompatible(expected, &*still_rejected, segment, offset)),
    }
}

fn incompatible(
    expected: &'static str,
    actual: &dyn Bean,
    segment: &Segment<'_>,
    offset: usize,
) -> PathError<'static> {
    PathError::Access(AccessError::new(
        AccessErrorKind::Incompatible {
            expected,
            actual: actual.type_name(),
        },
        segment,
        offset,
    ))
}

// -----------------------------------------------------------------------------
// Tests
