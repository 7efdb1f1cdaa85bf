use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::any::TypeId;
use core::fmt;

use crate::bean::BeanKind;
use crate::{Bean, Map};

// -----------------------------------------------------------------------------
// BTreeMap

impl<V: Bean> Bean for BTreeMap<String, V> {
    #[inline]
    fn kind(&self) -> BeanKind {
        BeanKind::Map
    }

    fn assign(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
        *self = value.take::<BTreeMap<String, V>>()?;
        Ok(())
    }

    #[inline]
    fn as_map(&self) -> Option<&dyn Map> {
        Some(self)
    }

    #[inline]
    fn as_map_mut(&mut self) -> Option<&mut dyn Map> {
        Some(self)
    }

    fn debug_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::impls::map_debug(self, f)
    }
}

impl<V: Bean> Map for BTreeMap<String, V> {
    #[inline]
    fn entry(&self, key: &str) -> Option<&dyn Bean> {
        self.get(key).map(|value| value as &dyn Bean)
    }

    #[inline]
    fn entry_mut(&mut self, key: &str) -> Option<&mut dyn Bean> {
        self.get_mut(key).map(|value| value as &mut dyn Bean)
    }

    fn insert_entry(
        &mut self,
        key: &str,
        value: Box<dyn Bean>,
    ) -> Result<Option<Box<dyn Bean>>, Box<dyn Bean>> {
        let value = value.take::<V>()?;
        match self.get_mut(key) {
            Some(slot) => {
                let old = core::mem::replace(slot, value);
                Ok(Some(Box::new(old)))
            }
            None => {
                self.insert(key.to_owned(), value);
                Ok(None)
            }
        }
    }

    #[inline]
    fn remove_entry(&mut self, key: &str) -> Option<Box<dyn Bean>> {
        self.remove(key).map(|value| Box::new(value) as Box<dyn Bean>)
    }

    #[inline]
    fn entry_len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &dyn Bean)> + '_> {
        Box::new(self.iter().map(|(key, value)| (key.as_str(), value as &dyn Bean)))
    }

    #[inline]
    fn value_type_name(&self) -> &'static str {
        core::any::type_name::<V>()
    }

    #[inline]
    fn value_type_id(&self) -> TypeId {
        TypeId::of::<V>()
    }
}

// -----------------------------------------------------------------------------
// HashMap (std)

#[cfg(feature = "std")]
mod hash_map {
    use alloc::borrow::ToOwned;
    use alloc::boxed::Box;
    use alloc::string::String;
    use core::any::TypeId;
    use core::fmt;
    use core::hash::BuildHasher;
    use std::collections::HashMap;

    use crate::bean::BeanKind;
    use crate::{Bean, Map};

    impl<V, S> Bean for HashMap<String, V, S>
    where
        V: Bean,
        S: BuildHasher + Send + Sync + 'static,
    {
        #[inline]
        fn kind(&self) -> BeanKind {
            BeanKind::Map
        }

        fn assign(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
            *self = value.take::<HashMap<String, V, S>>()?;
            Ok(())
        }

        #[inline]
        fn as_map(&self) -> Option<&dyn Map> {
            Some(self)
        }

        #[inline]
        fn as_map_mut(&mut self) -> Option<&mut dyn Map> {
            Some(self)
        }

        fn debug_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            crate::impls::map_debug(self, f)
        }
    }

    impl<V, S> Map for HashMap<String, V, S>
    where
        V: Bean,
        S: BuildHasher + Send + Sync + 'static,
    {
        #[inline]
        fn entry(&self, key: &str) -> Option<&dyn Bean> {
            self.get(key).map(|value| value as &dyn Bean)
        }

        #[inline]
        fn entry_mut(&mut self, key: &str) -> Option<&mut dyn Bean> {
            self.get_mut(key).map(|value| value as &mut dyn Bean)
        }

        fn insert_entry(
            &mut self,
            key: &str,
            value: Box<dyn Bean>,
        ) -> Result<Option<Box<dyn Bean>>, Box<dyn Bean>> {
            let value = value.take::<V>()?;
            match self.get_mut(key) {
                Some(slot) => {
                    let old = core::mem::replace(slot, value);
                    Ok(Some(Box::new(old)))
                }
                None => {
                    self.insert(key.to_owned(), value);
                    Ok(None)
                }
            }
        }

        #[inline]
        fn remove_entry(&mut self, key: &str) -> Option<Box<dyn Bean>> {
            self.remove(key).map(|value| Box::new(value) as Box<dyn Bean>)
        }

        #[inline]
        fn entry_len(&self) -> usize {
            self.len()
        }

        #[inline]
        fn entries(&self) -> Box<dyn Iterator<Item = (&str, &dyn Bean)> + '_> {
            Box::new(self.iter().map(|(key, value)| (key.as_str(), value as &dyn Bean)))
        }

        #[inline]
        fn value_type_name(&self) -> &'static str {
            core::any::type_name::<V>()
        }

        #[inline]
        fn value_type_id(&self) -> TypeId {
            TypeId::of::<V>()
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;

    use crate::{Bean, BeanKind, Map};

    #[test]
    fn btree_map_is_a_keyed_bean() {
        let mut map: BTreeMap<String, i64> = BTreeMap::new();
        map.insert("a".into(), 1);

        assert_eq!(map.kind(), BeanKind::Map);
        let as_map: &dyn Map = map.as_map().unwrap();
        assert_eq!(as_map.entry_as::<i64>("a"), Some(&1));
    }

    #[cfg(feature = "std")]
    #[test]
    fn hash_map_is_a_keyed_bean() {
        let mut map: std::collections::HashMap<String, bool> = std::collections::HashMap::new();
        map.insert("on".into(), true);

        let as_map: &mut dyn Map = map.as_map_mut().unwrap();
        as_map.insert_entry("off", Box::new(false)).unwrap();
        assert_eq!(as_map.entry_len(), 2);
        assert_eq!(as_map.entry_as::<bool>("off"), Some(&false));
    }
}
