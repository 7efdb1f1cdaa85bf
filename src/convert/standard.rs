use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use crate::bean::Bean;
use crate::convert::{ConvertError, ConverterRegistry};

// The standard rules all read the source through its `Display` text, so a
// `String`, an `&str`, or any other displayable leaf converts the same way.
fn display_text(value: &dyn Bean) -> Option<String> {
    value.as_display().map(|display| display.to_string())
}

fn unsupported(value: &dyn Bean, to: &'static str) -> ConvertError {
    ConvertError::Unsupported {
        from: value.type_name(),
        to,
    }
}

// `FromStr` over the trimmed display text. Numeric targets end up with the
// locale-independent canonical formats of the core parsers.
fn parse_text<T>(value: &dyn Bean) -> Result<Box<dyn Bean>, ConvertError>
where
    T: Bean + FromStr,
    T::Err: fmt::Display,
{
    let to = core::any::type_name::<T>();
    let text = display_text(value).ok_or_else(|| unsupported(value, to))?;
    let trimmed = text.trim_ascii();
    match trimmed.parse::<T>() {
        Ok(parsed) => Ok(Box::new(parsed)),
        Err(error) => Err(ConvertError::Invalid {
            to,
            detail: alloc::format!("{error}: `{trimmed}`").into(),
        }),
    }
}

// The boolean token table, case-insensitive.
fn parse_bool(value: &dyn Bean) -> Result<Box<dyn Bean>, ConvertError> {
    let to = core::any::type_name::<bool>();
    let text = display_text(value).ok_or_else(|| unsupported(value, to))?;
    let lowered = text.trim_ascii().to_ascii_lowercase();
    match lowered.as_str() {
        "true" | "yes" | "y" | "on" | "1" => Ok(Box::new(true)),
        "false" | "no" | "n" | "off" | "0" => Ok(Box::new(false)),
        _ => Err(ConvertError::Invalid {
            to,
            detail: alloc::format!("not a boolean token: `{lowered}`").into(),
        }),
    }
}

// A char is exactly one scalar, taken verbatim (whitespace counts).
fn parse_char(value: &dyn Bean) -> Result<Box<dyn Bean>, ConvertError> {
    let to = core::any::type_name::<char>();
    let text = display_text(value).ok_or_else(|| unsupported(value, to))?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Box::new(c)),
        _ => Err(ConvertError::Invalid {
            to,
            detail: alloc::format!("expected exactly one character, got `{text}`").into(),
        }),
    }
}

fn to_string(value: &dyn Bean) -> Result<Box<dyn Bean>, ConvertError> {
    let text =
        display_text(value).ok_or_else(|| unsupported(value, core::any::type_name::<String>()))?;
    Ok(Box::new(text))
}

pub(crate) fn install(registry: &mut ConverterRegistry) {
    registry.register::<bool>(parse_bool);
    registry.register::<char>(parse_char);

    registry.register::<u8>(parse_text::<u8>);
    registry.register::<u16>(parse_text::<u16>);
    registry.register::<u32>(parse_text::<u32>);
    registry.register::<u64>(parse_text::<u64>);
    registry.register::<u128>(parse_text::<u128>);
    registry.register::<usize>(parse_text::<usize>);

    registry.register::<i8>(parse_text::<i8>);
    registry.register::<i16>(parse_text::<i16>);
    registry.register::<i32>(parse_text::<i32>);
    registry.register::<i64>(parse_text::<i64>);
    registry.register::<i128>(parse_text::<i128>);
    registry.register::<isize>(parse_text::<isize>);

    registry.register::<f32>(parse_text::<f32>);
    registry.register::<f64>(parse_text::<f64>);

    registry.register::<String>(to_string);
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use crate::convert::{ConvertError, ConverterRegistry};

    fn registry() -> ConverterRegistry {
        let mut registry = ConverterRegistry::empty();
        super::install(&mut registry);
        registry
    }

    #[test]
    fn text_parses_into_numbers() {
        let registry = registry();
        assert_eq!(registry.convert_to::<i64>(Box::new(String::from("-42"))).unwrap(), -42);
        assert_eq!(registry.convert_to::<u16>(Box::new(String::from("8080"))).unwrap(), 8080);
        assert_eq!(registry.convert_to::<f64>(Box::new(String::from("2.5"))).unwrap(), 2.5);
    }

    #[test]
    fn surrounding_ascii_whitespace_is_trimmed() {
        let registry = registry();
        assert_eq!(
            registry.convert_to::<i32>(Box::new(String::from("  17\t"))).unwrap(),
            17
        );
    }

    #[test]
    fn static_strs_convert_like_strings() {
        let registry = registry();
        assert_eq!(registry.convert_to::<u8>(Box::new("7")).unwrap(), 7);
    }

    #[test]
    fn numbers_re_render_through_the_string_rule() {
        let registry = registry();
        let text: String = registry.convert_to(Box::new(250_i64)).unwrap();
        assert_eq!(text, "250");
    }

    #[test]
    fn numbers_cross_convert_through_their_text() {
        let registry = registry();
        let wide: i64 = registry.convert_to(Box::new(42_u8)).unwrap();
        assert_eq!(wide, 42);

        // Fractional text does not quietly truncate into an integer.
        let error = registry.convert_to::<i64>(Box::new(2.5_f64)).unwrap_err();
        assert!(matches!(error, ConvertError::Invalid { .. }));
    }

    #[test]
    fn boolean_token_table() {
        let registry = registry();
        for text in ["true", "Yes", "Y", "ON", "1"] {
            assert!(registry.convert_to::<bool>(Box::new(String::from(text))).unwrap());
        }
        for text in ["false", "No", "n", "OFF", "0"] {
            assert!(!registry.convert_to::<bool>(Box::new(String::from(text))).unwrap());
        }
        assert!(registry.convert_to::<bool>(Box::new(String::from("maybe"))).is_err());
    }

    #[test]
    fn char_requires_exactly_one_scalar() {
        let registry = registry();
        assert_eq!(registry.convert_to::<char>(Box::new(String::from("x"))).unwrap(), 'x');
        assert_eq!(registry.convert_to::<char>(Box::new(String::from(" "))).unwrap(), ' ');
        assert!(registry.convert_to::<char>(Box::new(String::from("xy"))).is_err());
        assert!(registry.convert_to::<char>(Box::new(String::new())).is_err());
    }

    #[test]
    fn displayless_sources_are_unsupported() {
        let registry = registry();
        let error = registry
            .convert_to::<i64>(Box::new(alloc::vec![1_i64]))
            .unwrap_err();
        assert!(matches!(error, ConvertError::Unsupported { .. }));
    }
}
