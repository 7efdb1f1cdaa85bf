use alloc::string::String;

use crate::impl_bean_opaque;

impl_bean_opaque!(bool, serde);
impl_bean_opaque!(char, serde);

impl_bean_opaque!(u8, serde);
impl_bean_opaque!(u16, serde);
impl_bean_opaque!(u32, serde);
impl_bean_opaque!(u64, serde);
impl_bean_opaque!(u128, serde);
impl_bean_opaque!(usize, serde);

impl_bean_opaque!(i8, serde);
impl_bean_opaque!(i16, serde);
impl_bean_opaque!(i32, serde);
impl_bean_opaque!(i64, serde);
impl_bean_opaque!(i128, serde);
impl_bean_opaque!(isize, serde);

impl_bean_opaque!(f32, serde);
impl_bean_opaque!(f64, serde);

impl_bean_opaque!(String, serde);

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::ToString;

    use crate::{Bean, BeanKind};

    #[test]
    fn scalars_are_opaque_leaves() {
        assert_eq!(42_u32.kind(), BeanKind::Opaque);
        assert!(42_u32.as_props().is_none());
        assert!(42_u32.as_list().is_none());
        assert!(42_u32.as_map().is_none());
        assert!(!42_u32.is_absent());
    }

    #[test]
    fn display_view_matches_canonical_text() {
        let value = 3.5_f64;
        assert_eq!(value.as_display().unwrap().to_string(), "3.5");
        assert_eq!(format!("{:?}", value.as_bean()), "3.5");
    }
}
