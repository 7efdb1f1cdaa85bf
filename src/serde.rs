//! Serialize bean graphs through their capabilities.
//!
//! [`BeanSerializer`] adapts any `&dyn Bean` to [`serde::Serialize`]:
//! named-property values serialize as maps of their properties, keyed
//! values as maps of their entries, indexed values as sequences, absent
//! values as `None`, and leaves through the erased `Serialize` view
//! registered with [`impl_bean_opaque!`](crate::impl_bean_opaque)'s
//! `serde` behavior.
//!
//! Only serialization is provided; building graphs from serialized data is
//! out of scope for this crate.
//!
//! # Examples
//!
//! ```
//! use beanpath::serde::BeanSerializer;
//! use beanpath::DynaBean;
//!
//! let mut address = DynaBean::new();
//! address.insert("city", String::from("Rome"));
//!
//! let mut person = DynaBean::new();
//! person.insert("name", String::from("Ada"));
//! person.insert("address", address);
//!
//! let json = serde_json::to_string(&BeanSerializer(&person)).unwrap();
//! assert_eq!(json, r#"{"name":"Ada","address":{"city":"Rome"}}"#);
//! ```

use ::serde::ser::{Error, SerializeMap, SerializeSeq, Serializer};
use ::serde::Serialize;

use crate::bean::Bean;

// -----------------------------------------------------------------------------
// BeanSerializer

/// Adapts a `&dyn Bean` to [`serde::Serialize`] by walking its
/// capabilities.
///
/// Capability precedence matches path resolution: named properties, then
/// keyed entries, then indexed elements, then the opaque leaf view. A leaf
/// without a `Serialize` view is a serialization error naming the type.
pub struct BeanSerializer<'a>(pub &'a dyn Bean);

impl Serialize for BeanSerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let bean = self.0;

        if bean.is_absent() {
            return serializer.serialize_none();
        }

        if let Some(props) = bean.as_props() {
            let mut state = serializer.serialize_map(Some(props.property_len()))?;
            for (name, value) in props.properties() {
                state.serialize_entry(name, &BeanSerializer(value))?;
            }
            return state.end();
        }

        if let Some(map) = bean.as_map() {
            let mut state = serializer.serialize_map(Some(map.entry_len()))?;
            for (key, value) in map.entries() {
                state.serialize_entry(key, &BeanSerializer(value))?;
            }
            return state.end();
        }

        if let Some(list) = bean.as_list() {
            let mut state = serializer.serialize_seq(Some(list.len()))?;
            for value in list.elements() {
                state.serialize_element(&BeanSerializer(value))?;
            }
            return state.end();
        }

        match bean.as_serialize() {
            Some(value) => erased_serde::serialize(value, serializer),
            None => Err(S::Error::custom(alloc::format!(
                "`{}` has no serializable view",
                bean.type_name()
            ))),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;

    use serde_json::json;

    use super::BeanSerializer;
    use crate::ops::DynaBean;
    use crate::bean_struct;

    struct Host {
        name: String,
        port: u16,
        tags: vec::Vec<String>,
        owner: Option<String>,
    }
    bean_struct!(Host { name, port, tags, owner });

    #[test]
    fn structs_serialize_as_maps_in_declaration_order() {
        let host = Host {
            name: "alpha".into(),
            port: 7000,
            tags: vec!["edge".into(), "eu".into()],
            owner: None,
        };

        let value = serde_json::to_value(BeanSerializer(&host)).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "alpha",
                "port": 7000,
                "tags": ["edge", "eu"],
                "owner": null,
            })
        );
    }

    #[test]
    fn options_are_transparent_when_present() {
        let host = Host {
            name: "beta".into(),
            port: 1,
            tags: vec![],
            owner: Some("ada".into()),
        };

        let value = serde_json::to_value(BeanSerializer(&host)).unwrap();
        assert_eq!(value["owner"], json!("ada"));
    }

    #[test]
    fn keyed_and_dynamic_beans_serialize_structurally() {
        let mut limits: BTreeMap<String, i64> = BTreeMap::new();
        limits.insert("max".into(), 10);
        limits.insert("min".into(), 1);

        let mut bean = DynaBean::new();
        bean.insert("limits", limits);

        let value = serde_json::to_value(BeanSerializer(&bean)).unwrap();
        assert_eq!(value, json!({ "limits": { "max": 10, "min": 1 } }));
    }

    #[test]
    fn leaves_without_a_serialize_view_fail_with_the_type_name() {
        struct Opaque;

        impl core::fmt::Display for Opaque {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str("opaque")
            }
        }

        impl core::fmt::Debug for Opaque {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str("Opaque")
            }
        }

        crate::impl_bean_opaque!(Opaque);

        let mut bean = DynaBean::new();
        bean.insert("value", Opaque);

        let error = serde_json::to_value(BeanSerializer(&bean)).unwrap_err();
        assert!(alloc::string::ToString::to_string(&error).contains("Opaque"));
    }
}
