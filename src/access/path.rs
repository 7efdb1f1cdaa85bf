use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::access::parse::{segments, ParseError};
use crate::access::resolve::{assign_final, PathError};
use crate::access::OffsetSegment;
use crate::bean::Bean;
use crate::convert::ConverterRegistry;

// -----------------------------------------------------------------------------
// PropertyPath

/// A parsed, reusable property path.
///
/// [`get`](crate::get) and [`set`](crate::set) parse their path argument on
/// every call; when the same path is resolved repeatedly, parse it once
/// into a `PropertyPath` and reuse it. A path always holds at least one
/// segment and never changes after parsing.
///
/// # Examples
///
/// ```
/// use beanpath::PropertyPath;
///
/// let mut rows = vec![vec![1_i64, 2, 3], vec![4, 5, 6]];
/// let path = PropertyPath::parse("1[2]").unwrap();
///
/// assert_eq!(path.get_as::<i64>(&rows).unwrap(), &6);
///
/// rows[1][2] = 60;
/// assert_eq!(path.get_as::<i64>(&rows).unwrap(), &60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyPath<'a>(Box<[OffsetSegment<'a>]>);

impl<'a> PropertyPath<'a> {
    /// Parses `path` into its segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use beanpath::PropertyPath;
    ///
    /// let path = PropertyPath::parse("a.b[2].c(key)").unwrap();
    /// assert_eq!(path.len(), 3);
    ///
    /// assert!(PropertyPath::parse("a..b").is_err());
    /// ```
    pub fn parse(path: &'a str) -> Result<Self, ParseError<'a>> {
        let mut parsed = Vec::new();
        for result in segments(path) {
            parsed.push(result?);
        }
        Ok(PropertyPath(parsed.into_boxed_slice()))
    }

    /// Returns the number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the parsed segments in order.
    #[inline]
    pub fn segments(&self) -> &[OffsetSegment<'a>] {
        &self.0
    }

    /// Converts this path into one that owns its strings, detaching it from
    /// the source string's lifetime.
    pub fn into_owned(self) -> PropertyPath<'static> {
        let segments: Vec<OffsetSegment<'static>> = self
            .0
            .into_vec()
            .into_iter()
            .map(OffsetSegment::into_owned)
            .collect();
        PropertyPath(segments.into_boxed_slice())
    }

    /// Resolves this path against `root` and returns the addressed value.
    pub fn get<'r>(&self, root: &'r dyn Bean) -> Result<&'r dyn Bean, PathError<'static>> {
        let mut current = root;
        for segment in &self.0 {
            current = segment.apply(current)?;
        }
        Ok(current)
    }

    /// Resolves this path against `root` and returns the addressed value
    /// mutably.
    pub fn get_mut<'r>(
        &self,
        root: &'r mut dyn Bean,
    ) -> Result<&'r mut dyn Bean, PathError<'static>> {
        let mut current = root;
        for segment in &self.0 {
            current = segment.apply_mut(current)?;
        }
        Ok(current)
    }

    /// Resolves this path against `root` and returns the addressed value
    /// typed.
    #[inline]
    pub fn get_as<'r, T: Bean>(&self, root: &'r dyn Bean) -> Result<&'r T, PathError<'static>> {
        self.get(root)?
            .downcast_ref::<T>()
            .ok_or(PathError::Downcast {
                expected: core::any::type_name::<T>(),
            })
    }

    /// Resolves this path against `root` and returns the addressed value
    /// typed and mutable.
    #[inline]
    pub fn get_mut_as<'r, T: Bean>(
        &self,
        root: &'r mut dyn Bean,
    ) -> Result<&'r mut T, PathError<'static>> {
        self.get_mut(root)?
            .downcast_mut::<T>()
            .ok_or(PathError::Downcast {
                expected: core::any::type_name::<T>(),
            })
    }

    /// Sets the value this path addresses; see [`set`](crate::set).
    #[inline]
    pub fn set<V: Bean>(&self, root: &mut dyn Bean, value: V) -> Result<(), PathError<'static>> {
        self.set_impl(root, Box::new(value), None)
    }

    /// Sets the value this path addresses to an already-boxed `value`.
    #[inline]
    pub fn set_boxed(
        &self,
        root: &mut dyn Bean,
        value: Box<dyn Bean>,
    ) -> Result<(), PathError<'static>> {
        self.set_impl(root, value, None)
    }

    /// Sets the value this path addresses, converting through `registry`
    /// when the slot rejects the value as-is; see
    /// [`set_converted`](crate::set_converted).
    #[inline]
    pub fn set_converted(
        &self,
        registry: &ConverterRegistry,
        root: &mut dyn Bean,
        value: Box<dyn Bean>,
    ) -> Result<(), PathError<'static>> {
        self.set_impl(root, value, Some(registry))
    }

    fn set_impl(
        &self,
        root: &mut dyn Bean,
        value: Box<dyn Bean>,
        registry: Option<&ConverterRegistry>,
    ) -> Result<(), PathError<'static>> {
        // `parse` guarantees at least one segment.
        let Some((last, intermediates)) = self.0.split_last() else {
            return Ok(());
        };
        let mut current = root;
        for segment in intermediates {
            current = segment.apply_mut(current)?;
        }
        assign_final(current, last, value, registry)
    }
}

impl fmt::Display for PropertyPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.0.iter().enumerate() {
            if position > 0 {
                f.write_str(".")?;
            }
            fmt::Display::fmt(segment, f)?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;

    use super::PropertyPath;
    use crate::bean_struct;

    struct Entry {
        label: String,
    }
    bean_struct!(Entry { label });

    struct Board {
        entries: vec::Vec<Entry>,
    }
    bean_struct!(Board { entries });

    fn board() -> Board {
        Board {
            entries: vec![
                Entry { label: "first".into() },
                Entry { label: "second".into() },
            ],
        }
    }

    #[test]
    fn reuse_observes_current_state() {
        let mut board = board();
        let path = PropertyPath::parse("entries[1].label").unwrap();

        assert_eq!(path.get_as::<String>(&board).unwrap(), "second");

        path.set(&mut board, String::from("changed")).unwrap();
        assert_eq!(path.get_as::<String>(&board).unwrap(), "changed");
        assert_eq!(board.entries[1].label, "changed");
    }

    #[test]
    fn display_reconstructs_the_source_text() {
        for source in ["a", "a.b", "a.b[2].c", "m(k.x).v", "entries[0].label"] {
            let path = PropertyPath::parse(source).unwrap();
            assert_eq!(path.to_string(), source);
        }
    }

    #[test]
    fn into_owned_detaches_from_the_source() {
        let owned: PropertyPath<'static> = {
            let source = String::from("entries[0].label");
            PropertyPath::parse(&source).unwrap().into_owned()
        };
        let board = board();
        assert_eq!(owned.get_as::<String>(&board).unwrap(), "first");
    }

    #[test]
    fn len_counts_segments() {
        assert_eq!(PropertyPath::parse("a").unwrap().len(), 1);
        assert_eq!(PropertyPath::parse("a.b[1].c(k)").unwrap().len(), 3);
    }
}
