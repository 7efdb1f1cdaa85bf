use alloc::borrow::Cow;
use core::fmt;

use crate::access::{OffsetSegment, Segment};

// -----------------------------------------------------------------------------
// ParseError

/// An error raised while parsing a property path string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError<'a> {
    /// Byte offset of the problem in `path`.
    pub offset: usize,
    /// The path being parsed.
    pub path: &'a str,
    /// What went wrong.
    pub message: &'static str,
}

impl fmt::Display for ParseError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "malformed property path `{}` at offset {}: {}",
            self.path, self.offset, self.message,
        )
    }
}

impl core::error::Error for ParseError<'_> {}

// -----------------------------------------------------------------------------
// Parsing

/// Returns an iterator lazily parsing `path` into [`OffsetSegment`]s.
///
/// The grammar is `segment ('.' segment)*`, where a segment is a name
/// optionally followed by exactly one `[index]` or `(key)` suffix. Names
/// must be non-empty and exclude the delimiter characters `. [ ] ( )`;
/// whitespace is preserved verbatim. Keys run to the next `)` and may
/// contain anything else, dots included.
///
/// Parsing stops at the first error; the iterator yields it once and then
/// ends. An empty path is itself an error, so the iterator always yields at
/// least one item.
///
/// For repeated resolution of the same path, parse once into a
/// [`PropertyPath`](crate::PropertyPath) instead.
///
/// # Examples
///
/// ```
/// use beanpath::segments;
///
/// let count = segments("a.b[2].c").filter(|result| result.is_ok()).count();
/// assert_eq!(count, 3);
///
/// assert!(segments("a..b").any(|result| result.is_err()));
/// ```
#[inline]
pub fn segments(path: &str) -> SegmentIter<'_> {
    SegmentIter {
        path,
        cursor: 0,
        started: false,
        failed: false,
    }
}

/// The iterator returned by [`segments`].
#[derive(Debug, Clone)]
pub struct SegmentIter<'a> {
    path: &'a str,
    cursor: usize,
    started: bool,
    failed: bool,
}

impl<'a> SegmentIter<'a> {
    fn fail(
        &mut self,
        offset: usize,
        message: &'static str,
    ) -> Option<Result<OffsetSegment<'a>, ParseError<'a>>> {
        self.failed = true;
        Some(Err(ParseError {
            offset,
            path: self.path,
            message,
        }))
    }

    // Scans the `[index]` suffix; the cursor sits on `[`.
    fn scan_index(&mut self) -> Result<usize, Option<Result<OffsetSegment<'a>, ParseError<'a>>>> {
        let path: &'a str = self.path;
        let open = self.cursor;
        self.cursor += 1;
        let rest = &path[self.cursor..];
        let Some(close) = rest.find(']') else {
            return Err(self.fail(open, "unterminated `[`"));
        };
        let digits = &rest[..close];
        let start = self.cursor;
        if digits.is_empty() {
            return Err(self.fail(start, "empty index"));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.fail(start, "index is not a decimal number"));
        }
        let Ok(index) = digits.parse::<usize>() else {
            return Err(self.fail(start, "index does not fit in usize"));
        };
        self.cursor += close + 1;
        Ok(index)
    }

    // Scans the `(key)` suffix; the cursor sits on `(`.
    fn scan_key(&mut self) -> Result<&'a str, Option<Result<OffsetSegment<'a>, ParseError<'a>>>> {
        let path: &'a str = self.path;
        let open = self.cursor;
        self.cursor += 1;
        let rest = &path[self.cursor..];
        let Some(close) = rest.find(')') else {
            return Err(self.fail(open, "unterminated `(`"));
        };
        let key = &rest[..close];
        self.cursor += close + 1;
        Ok(key)
    }
}

impl<'a> Iterator for SegmentIter<'a> {
    type Item = Result<OffsetSegment<'a>, ParseError<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if self.started {
            if self.cursor >= self.path.len() {
                return None;
            }
            // The previous segment left the cursor on the separator.
            self.cursor += 1;
        } else {
            self.started = true;
        }

        let path: &'a str = self.path;
        let start = self.cursor;
        let rest = &path[self.cursor..];
        let name_len = rest.find(['.', '[', ']', '(', ')']).unwrap_or(rest.len());
        let name = &rest[..name_len];
        if name.is_empty() {
            return self.fail(start, "empty segment name");
        }
        self.cursor += name_len;

        let segment = match self.path.as_bytes().get(self.cursor) {
            None | Some(b'.') => Segment::Name(Cow::Borrowed(name)),
            Some(b'[') => {
                let index = match self.scan_index() {
                    Ok(index) => index,
                    Err(error) => return error,
                };
                Segment::Index {
                    name: Cow::Borrowed(name),
                    index,
                }
            }
            Some(b'(') => {
                let key = match self.scan_key() {
                    Ok(key) => key,
                    Err(error) => return error,
                };
                Segment::Key {
                    name: Cow::Borrowed(name),
                    key: Cow::Borrowed(key),
                }
            }
            Some(b']') => return self.fail(self.cursor, "unexpected `]`"),
            Some(_) => return self.fail(self.cursor, "unexpected `)`"),
        };

        // A suffixed segment must be followed by a separator or the end;
        // this also rejects a second suffix on the same segment.
        if !matches!(segment, Segment::Name(_)) {
            match self.path.as_bytes().get(self.cursor) {
                None | Some(b'.') => {}
                Some(_) => {
                    return self.fail(self.cursor, "expected `.` or end of path after suffix");
                }
            }
        }

        Some(Ok(OffsetSegment::new(segment, start)))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{segments, ParseError};
    use crate::access::Segment;

    fn parse_all(path: &str) -> Result<Vec<Segment<'_>>, ParseError<'_>> {
        segments(path)
            .map(|result| result.map(|offset_segment| offset_segment.segment))
            .collect()
    }

    fn parse_err(path: &str) -> ParseError<'_> {
        parse_all(path).unwrap_err()
    }

    #[test]
    fn segment_count_and_order_match_the_source() {
        let parsed = parse_all("first.second[3].third(key).fourth").unwrap();
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed[0], Segment::Name("first".into()));
        assert_eq!(parsed[1], Segment::Index { name: "second".into(), index: 3 });
        assert_eq!(parsed[2], Segment::Key { name: "third".into(), key: "key".into() });
        assert_eq!(parsed[3], Segment::Name("fourth".into()));
    }

    #[test]
    fn offsets_point_at_segment_starts() {
        let offsets: Vec<usize> = segments("ab.cd[1].e")
            .map(|result| result.unwrap().offset)
            .collect();
        assert_eq!(offsets, [0, 3, 9]);
    }

    #[test]
    fn whitespace_is_preserved_verbatim() {
        let parsed = parse_all("first name.last name").unwrap();
        assert_eq!(parsed[0], Segment::Name("first name".into()));
        assert_eq!(parsed[1], Segment::Name("last name".into()));
    }

    #[test]
    fn keys_may_contain_dots_and_brackets() {
        let parsed = parse_all("m(a.b[0])").unwrap();
        assert_eq!(
            parsed[0],
            Segment::Key { name: "m".into(), key: "a.b[0]".into() }
        );
    }

    #[test]
    fn empty_keys_are_allowed() {
        let parsed = parse_all("m()").unwrap();
        assert_eq!(parsed[0], Segment::Key { name: "m".into(), key: "".into() });
    }

    #[test]
    fn empty_names_are_rejected() {
        assert_eq!(parse_err("").message, "empty segment name");
        assert_eq!(parse_err(".a").message, "empty segment name");
        assert_eq!(parse_err("a..b").message, "empty segment name");
        let trailing = parse_err("a.");
        assert_eq!(trailing.message, "empty segment name");
        assert_eq!(trailing.offset, 2);
        assert_eq!(parse_err("[0]").message, "empty segment name");
    }

    #[test]
    fn bad_indexes_are_rejected() {
        assert_eq!(parse_err("a[]").message, "empty index");
        assert_eq!(parse_err("a[x]").message, "index is not a decimal number");
        assert_eq!(parse_err("a[-1]").message, "index is not a decimal number");
        assert_eq!(parse_err("a[1").message, "unterminated `[`");
        assert_eq!(
            parse_err("a[99999999999999999999999999]").message,
            "index does not fit in usize"
        );
    }

    #[test]
    fn unterminated_and_dangling_delimiters_are_rejected() {
        assert_eq!(parse_err("a(k").message, "unterminated `(`");
        assert_eq!(parse_err("a]b").message, "unexpected `]`");
        assert_eq!(parse_err("a)b").message, "unexpected `)`");
    }

    #[test]
    fn one_suffix_per_segment() {
        assert_eq!(
            parse_err("a[1](k)").message,
            "expected `.` or end of path after suffix"
        );
        assert_eq!(
            parse_err("a[1][2]").message,
            "expected `.` or end of path after suffix"
        );
        assert_eq!(
            parse_err("a(k)x").message,
            "expected `.` or end of path after suffix"
        );
    }

    #[test]
    fn parsing_stops_after_the_first_error() {
        let mut iter = segments("a..b");
        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().unwrap().is_err());
        assert!(iter.next().is_none());
    }
}
