use alloc::boxed::Box;
use core::any::TypeId;

use crate::Bean;

// -----------------------------------------------------------------------------
// Map trait

/// The keyed-entry capability.
///
/// A `Map` value exposes entries addressable by string key:
/// `BTreeMap<String, V>` out of the box, `HashMap<String, V>` with the
/// `std` feature. Path segments of the form `name(key)` resolve through
/// this trait, as do simple names on map values that have no declared
/// property of that name.
///
/// Unlike properties and list elements, keyed entries may be *created* by a
/// write: `set` on a key segment inserts the entry when it is missing.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use beanpath::Map;
///
/// let mut limits: BTreeMap<String, i64> = BTreeMap::new();
/// limits.insert("max".into(), 10);
///
/// let map: &dyn Map = &limits;
/// assert_eq!(map.entry_as::<i64>("max"), Some(&10));
/// assert!(map.entry("missing").is_none());
/// ```
pub trait Map: Bean {
    /// Returns the entry for `key`, or `None` when absent.
    fn entry(&self, key: &str) -> Option<&dyn Bean>;

    /// Returns the entry for `key` mutably, or `None` when absent.
    fn entry_mut(&mut self, key: &str) -> Option<&mut dyn Bean>;

    /// Inserts or replaces the entry for `key`.
    ///
    /// Returns the previous value when the key existed, or gives the value
    /// back when its type is incompatible with this map; the map is
    /// unchanged in that case.
    fn insert_entry(
        &mut self,
        key: &str,
        value: Box<dyn Bean>,
    ) -> Result<Option<Box<dyn Bean>>, Box<dyn Bean>>;

    /// Removes the entry for `key`, returning its value.
    fn remove_entry(&mut self, key: &str) -> Option<Box<dyn Bean>>;

    /// Returns the number of entries.
    fn entry_len(&self) -> usize;

    /// Returns an iterator over `(key, value)` pairs.
    ///
    /// Iteration order is whatever the underlying container provides.
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &dyn Bean)> + '_>;

    /// Returns the name of the value type entries must hold, for error
    /// reporting on rejected inserts.
    fn value_type_name(&self) -> &'static str;

    /// Returns the [`TypeId`] of the value type entries must hold.
    ///
    /// Conversion-aware writes use this as the conversion target when
    /// inserting a new entry.
    fn value_type_id(&self) -> TypeId;
}

impl dyn Map {
    /// Returns a typed reference to the entry for `key`.
    ///
    /// Returns `None` when the entry is absent or holds a different type.
    #[inline]
    pub fn entry_as<T: Bean>(&self, key: &str) -> Option<&T> {
        self.entry(key).and_then(<dyn Bean>::downcast_ref)
    }

    /// Returns a typed mutable reference to the entry for `key`.
    ///
    /// Returns `None` when the entry is absent or holds a different type.
    #[inline]
    pub fn entry_mut_as<T: Bean>(&mut self, key: &str) -> Option<&mut T> {
        self.entry_mut(key).and_then(<dyn Bean>::downcast_mut)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;

    use crate::Map;

    #[test]
    fn insert_entry_creates_and_replaces() {
        let mut inner: BTreeMap<String, i64> = BTreeMap::new();
        let map: &mut dyn Map = &mut inner;

        assert!(map.insert_entry("a", Box::new(1_i64)).unwrap().is_none());
        let old = map.insert_entry("a", Box::new(2_i64)).unwrap().unwrap();
        assert_eq!(old.take::<i64>().unwrap(), 1);
        assert_eq!(map.entry_as::<i64>("a"), Some(&2));
    }

    #[test]
    fn insert_entry_rejects_wrong_type() {
        let mut inner: BTreeMap<String, i64> = BTreeMap::new();
        let map: &mut dyn Map = &mut inner;

        let rejected = map.insert_entry("a", Box::new(String::from("x"))).unwrap_err();
        assert!(rejected.is::<String>());
        assert_eq!(map.entry_len(), 0);
        assert_eq!(map.value_type_name(), core::any::type_name::<i64>());
    }

    #[test]
    fn entries_iterates_pairs() {
        let mut inner: BTreeMap<String, i64> = BTreeMap::new();
        inner.insert("x".into(), 1);
        inner.insert("y".into(), 2);

        let map: &dyn Map = &inner;
        let keys: Vec<&str> = map.entries().map(|(key, _)| key).collect();
        assert_eq!(keys, ["x", "y"]);
    }
}
