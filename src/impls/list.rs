use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::bean::BeanKind;
use crate::ops::ListIter;
use crate::{Bean, List};

// -----------------------------------------------------------------------------
// Vec

impl<T: Bean> Bean for Vec<T> {
    #[inline]
    fn kind(&self) -> BeanKind {
        BeanKind::List
    }

    fn assign(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
        *self = value.take::<Vec<T>>()?;
        Ok(())
    }

    #[inline]
    fn as_list(&self) -> Option<&dyn List> {
        Some(self)
    }

    #[inline]
    fn as_list_mut(&mut self) -> Option<&mut dyn List> {
        Some(self)
    }

    fn debug_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::impls::list_debug(self, f)
    }
}

impl<T: Bean> List for Vec<T> {
    #[inline]
    fn element(&self, index: usize) -> Option<&dyn Bean> {
        self.get(index).map(|value| value as &dyn Bean)
    }

    #[inline]
    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Bean> {
        self.get_mut(index).map(|value| value as &mut dyn Bean)
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn elements(&self) -> ListIter<'_> {
        ListIter::new(self)
    }
}

// -----------------------------------------------------------------------------
// Arrays

impl<T: Bean, const N: usize> Bean for [T; N] {
    #[inline]
    fn kind(&self) -> BeanKind {
        BeanKind::List
    }

    fn assign(&mut self, value: Box<dyn Bean>) -> Result<(), Box<dyn Bean>> {
        *self = value.take::<[T; N]>()?;
        Ok(())
    }

    #[inline]
    fn as_list(&self) -> Option<&dyn List> {
        Some(self)
    }

    #[inline]
    fn as_list_mut(&mut self) -> Option<&mut dyn List> {
        Some(self)
    }

    fn debug_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::impls::list_debug(self, f)
    }
}

impl<T: Bean, const N: usize> List for [T; N] {
    #[inline]
    fn element(&self, index: usize) -> Option<&dyn Bean> {
        self.get(index).map(|value| value as &dyn Bean)
    }

    #[inline]
    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Bean> {
        self.get_mut(index).map(|value| value as &mut dyn Bean)
    }

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn elements(&self) -> ListIter<'_> {
        ListIter::new(self)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::{Bean, BeanKind};

    #[test]
    fn vec_assign_replaces_whole_list() {
        let mut values = vec![1_i64, 2];
        values.assign(Box::new(vec![9_i64])).unwrap();
        assert_eq!(values, [9]);

        // An element-typed value is not a list.
        assert!(values.assign(Box::new(1_i64)).is_err());
    }

    #[test]
    fn nested_lists_expose_list_capability_per_level() {
        let values: Vec<Vec<u8>> = vec![vec![1, 2], vec![3]];
        assert_eq!(values.kind(), BeanKind::List);
        let inner = values.as_list().unwrap().element(1).unwrap();
        assert_eq!(inner.as_list().unwrap().len(), 1);
    }
}
