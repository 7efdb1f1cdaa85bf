//! Property discovery and its customization hooks.
//!
//! [`PropertySet`] is the ordered set of property names discovered on a
//! value. An [`Introspector`] is a hook that edits the discovered set
//! (only ever shrinking it) before callers see it; [`SuppressProperties`]
//! is the stock hook, hiding a fixed list of names. [`Introspection`]
//! chains hooks and produces the final set for a value.
//!
//! Hooks must be idempotent and side-effect-free beyond the removal: path
//! resolution never consults them, only property discovery does.
//!
//! # Examples
//!
//! ```
//! use beanpath::{bean_struct, suppress_properties, Introspection};
//!
//! struct Credentials { user: String, password: String }
//! bean_struct!(Credentials { user, password });
//!
//! let mut introspection = Introspection::new();
//! introspection.add(suppress_properties(["password"]));
//!
//! let credentials = Credentials { user: "ada".into(), password: "s3cret".into() };
//! let properties = introspection.describe(&credentials);
//!
//! assert!(properties.contains("user"));
//! assert!(!properties.contains("password"));
//! ```

// -----------------------------------------------------------------------------
// Modules

mod property_set;
mod suppress;

// -----------------------------------------------------------------------------
// Exports

pub use property_set::PropertySet;
pub use suppress::{suppress_properties, SuppressProperties};

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::bean::Bean;

// -----------------------------------------------------------------------------
// Introspector

/// A hook that customizes property discovery by removing names from the
/// discovered set.
///
/// Implementations must be idempotent, must not add names, and must have no
/// effect beyond the removal.
pub trait Introspector: Send + Sync {
    /// Edits the discovered property set in place.
    fn introspect(&self, properties: &mut PropertySet);
}

// -----------------------------------------------------------------------------
// Introspection

/// An ordered chain of [`Introspector`] hooks.
///
/// [`describe`](Introspection::describe) collects a value's declared
/// property names and runs every hook over them, in registration order.
#[derive(Default)]
pub struct Introspection {
    hooks: Vec<Box<dyn Introspector>>,
}

impl Introspection {
    /// Creates a chain with no hooks.
    #[inline]
    pub const fn new() -> Self {
        Introspection { hooks: Vec::new() }
    }

    /// Appends a hook to the chain.
    pub fn add(&mut self, hook: impl Introspector + 'static) -> &mut Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Returns the number of registered hooks.
    #[inline]
    pub fn hook_len(&self) -> usize {
        self.hooks.len()
    }

    /// Discovers `bean`'s properties and filters them through the hooks.
    ///
    /// A value without the named-property capability yields the empty set.
    pub fn describe(&self, bean: &dyn Bean) -> PropertySet {
        let mut properties = match bean.as_props() {
            Some(props) => PropertySet::of(props),
            None => PropertySet::new(),
        };
        for hook in &self.hooks {
            hook.introspect(&mut properties);
        }
        properties
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::{Introspection, Introspector, PropertySet};
    use crate::{bean_struct, suppress_properties};

    struct Sample {
        a: i64,
        b: i64,
        c: i64,
    }
    bean_struct!(Sample { a, b, c });

    fn sample() -> Sample {
        Sample { a: 1, b: 2, c: 3 }
    }

    #[test]
    fn describe_reports_declared_names_in_order() {
        let introspection = Introspection::new();
        let properties = introspection.describe(&sample());
        let names: Vec<&str> = properties.iter().collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn hooks_run_in_registration_order() {
        struct KeepFirst;

        impl Introspector for KeepFirst {
            fn introspect(&self, properties: &mut PropertySet) {
                let first: Option<String> = properties.iter().next().map(String::from);
                properties.retain(|name| Some(name) == first.as_deref());
            }
        }

        let mut introspection = Introspection::new();
        introspection.add(suppress_properties(["a"]));
        introspection.add(KeepFirst);
        assert_eq!(introspection.hook_len(), 2);

        let properties = introspection.describe(&sample());
        let names: Vec<&str> = properties.iter().collect();
        assert_eq!(names, ["b"]);
    }

    #[test]
    fn capability_free_values_describe_as_empty() {
        let introspection = Introspection::new();
        let properties = introspection.describe(&7_i64);
        assert!(properties.is_empty());
    }
}
