use alloc::collections::BTreeSet;
use alloc::string::String;

use crate::introspect::{Introspector, PropertySet};

// -----------------------------------------------------------------------------
// SuppressProperties

/// An [`Introspector`] hiding a fixed list of property names.
///
/// The list is copied at construction, so later changes to the caller's
/// collection never alter what gets suppressed. The hook removes exactly
/// the listed names and nothing else, making it idempotent by
/// construction.
///
/// # Examples
///
/// ```
/// use beanpath::{suppress_properties, Introspector, PropertySet};
///
/// let hook = suppress_properties(["a", "c"]);
///
/// let mut properties: PropertySet = ["a", "b", "c"].into_iter().collect();
/// hook.introspect(&mut properties);
///
/// let names: Vec<&str> = properties.iter().collect();
/// assert_eq!(names, ["b"]);
/// ```
#[derive(Debug, Clone)]
pub struct SuppressProperties {
    suppressed: BTreeSet<String>,
}

impl SuppressProperties {
    /// Creates a hook suppressing `names`, copying them as it goes.
    pub fn new<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        SuppressProperties {
            suppressed: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the suppressed names, read-only.
    #[inline]
    pub fn suppressed(&self) -> &BTreeSet<String> {
        &self.suppressed
    }
}

impl Introspector for SuppressProperties {
    fn introspect(&self, properties: &mut PropertySet) {
        properties.retain(|name| !self.suppressed.contains(name));
    }
}

/// Creates a [`SuppressProperties`] hook; shorthand for
/// [`SuppressProperties::new`].
#[inline]
pub fn suppress_properties<I>(names: I) -> SuppressProperties
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    SuppressProperties::new(names)
}

// -----------------------------------------------------------------------------
// Tests
