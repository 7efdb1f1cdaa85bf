use alloc::borrow::Cow;

use crate::impl_bean_opaque;

// `String` lives with the other leaves in `scalar.rs`; these are the
// borrowed forms.
impl_bean_opaque!(&'static str, serde);
impl_bean_opaque!(Cow<'static, str>, serde);

#[cfg(test)]
mod tests {
    use alloc::borrow::Cow;
    use alloc::boxed::Box;

    use crate::Bean;

    #[test]
    fn static_str_assign_swaps_the_reference() {
        let mut value = "before";
        value.assign(Box::new("after")).unwrap();
        assert_eq!(value, "after");
    }

    #[test]
    fn cow_str_is_a_distinct_bean_type() {
        let value: Cow<'static, str> = Cow::Borrowed("text");
        let boxed: Box<dyn Bean> = value.into_boxed_bean();
        assert!(!boxed.is::<&'static str>());
        assert!(boxed.is::<Cow<'static, str>>());
    }
}
