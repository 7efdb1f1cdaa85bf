use core::fmt;

use crate::ops::{List, Map, Properties};

/// Writes a struct-style debug rendering of a [`Properties`] value.
///
/// Used by the `Bean::debug_value` implementations the registration macros
/// generate.
pub fn props_debug(props: &dyn Properties, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut dbg = f.debug_struct(short_type_name(props.type_name()));
    for (name, value) in props.properties() {
        dbg.field(name, &value);
    }
    dbg.finish()
}

/// Writes a list-style debug rendering of a [`List`] value.
pub fn list_debug(list: &dyn List, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut dbg = f.debug_list();
    for value in list.elements() {
        dbg.entry(&value);
    }
    dbg.finish()
}

/// Writes a map-style debug rendering of a [`Map`] value.
pub fn map_debug(map: &dyn Map, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut dbg = f.debug_map();
    for (key, value) in map.entries() {
        dbg.entry(&key, &value);
    }
    dbg.finish()
}

// `core::any::type_name` includes the full module path; debug output only
// wants the trailing identifier. Generic names keep their full form rather
// than risk splitting inside the argument list.
fn short_type_name(full: &'static str) -> &'static str {
    if full.contains('<') {
        return full;
    }
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::vec;

    use crate::Bean;

    #[test]
    fn list_debug_renders_elements() {
        let values = vec![1_i64, 2, 3];
        assert_eq!(format!("{:?}", values.as_bean()), "[1, 2, 3]");
    }
}
