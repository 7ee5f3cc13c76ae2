use gpui::{AbsoluteLength, DefiniteLength, Pixels, SharedString, px, rems};
use serde::{Deserialize, Deserializer, de::Error};
use smallvec::SmallVec;

use crate::ThemeVariant;

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrFloat {
    String(String),
    Float(f32),
}

/// A length literal as written in a theme file.
#[derive(Debug, Clone, Copy, PartialEq)]
enum LengthLiteral {
    Pixels(f32),
    Rems(f32),
    Percent(f32),
}

impl LengthLiteral {
    fn parse(string: &str) -> Option<Self> {
        let string = string.trim();

        if let Some(value) = string.strip_suffix("rem") {
            return value.trim().parse().ok().map(Self::Rems);
        }

        if let Some(value) = string.strip_suffix("px") {
            return value.trim().parse().ok().map(Self::Pixels);
        }

        if let Some(value) = string.strip_suffix('%') {
            return value.trim().parse().ok().map(Self::Percent);
        }

        None
    }

    fn read<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match StringOrFloat::deserialize(deserializer)? {
            StringOrFloat::Float(value) => Ok(Self::Pixels(value)),
            StringOrFloat::String(string) => Self::parse(&string).ok_or_else(|| {
                D::Error::custom(format!(
                    "expected a number or a string ending with 'px', 'rem' or '%', got \"{string}\""
                ))
            }),
        }
    }
}

pub fn de_string_or_non_empty_list<'de, D>(
    deserializer: D,
) -> Result<SmallVec<[SharedString; 1]>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrVec {
        One(SharedString),
        Many(SmallVec<[SharedString; 1]>),
    }

    match StringOrVec::deserialize(deserializer)? {
        StringOrVec::One(string) => Ok(SmallVec::from_buf([string])),
        StringOrVec::Many(list) if list.is_empty() => Err(D::Error::custom("list can't be empty.")),
        StringOrVec::Many(list) => Ok(list),
    }
}

pub fn de_variants<'de, D>(deserializer: D) -> Result<SmallVec<[ThemeVariant; 2]>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SmallVec::deserialize(deserializer)?;

    if value.is_empty() {
        return Err(D::Error::custom(
            "at least one theme variant needs to be provided.",
        ));
    }

    Ok(value)
}

pub fn de_pixels<'de, D>(deserializer: D) -> Result<Pixels, D::Error>
where
    D: Deserializer<'de>,
{
    match LengthLiteral::read(deserializer)? {
        LengthLiteral::Pixels(value) => Ok(px(value)),
        other => Err(D::Error::custom(format!(
            "expected a pixel value, got {other:?}"
        ))),
    }
}

pub fn de_abs_length<'de, D>(deserializer: D) -> Result<AbsoluteLength, D::Error>
where
    D: Deserializer<'de>,
{
    match LengthLiteral::read(deserializer)? {
        LengthLiteral::Pixels(value) => Ok(AbsoluteLength::Pixels(px(value))),
        LengthLiteral::Rems(value) => Ok(AbsoluteLength::Rems(rems(value))),
        LengthLiteral::Percent(_) => Err(D::Error::custom(
            "relative lengths are not allowed here, use 'px' or 'rem'",
        )),
    }
}

pub fn de_def_length<'de, D>(deserializer: D) -> Result<DefiniteLength, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LengthLiteral::read(deserializer)? {
        LengthLiteral::Pixels(value) => DefiniteLength::Absolute(AbsoluteLength::Pixels(px(value))),
        LengthLiteral::Rems(value) => DefiniteLength::Absolute(AbsoluteLength::Rems(rems(value))),
        LengthLiteral::Percent(value) => DefiniteLength::Fraction(value / 100.),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Lengths {
        #[serde(deserialize_with = "de_pixels")]
        pixels: Pixels,
        #[serde(deserialize_with = "de_abs_length")]
        absolute: AbsoluteLength,
        #[serde(deserialize_with = "de_def_length")]
        definite: DefiniteLength,
    }

    #[test]
    fn test_length_literals() {
        assert_eq!(LengthLiteral::parse("12px"), Some(LengthLiteral::Pixels(12.)));
        assert_eq!(LengthLiteral::parse(" 1.5rem "), Some(LengthLiteral::Rems(1.5)));
        assert_eq!(LengthLiteral::parse("140%"), Some(LengthLiteral::Percent(140.)));
        assert_eq!(LengthLiteral::parse("12"), None);
        assert_eq!(LengthLiteral::parse("twelve px"), None);
    }

    #[test]
    fn test_lengths_deserialize() {
        let lengths: Lengths =
            serde_json::from_str(r#"{ "pixels": 4, "absolute": "1rem", "definite": "50%" }"#)
                .unwrap();

        assert_eq!(lengths.pixels, px(4.));
        assert_eq!(lengths.absolute, AbsoluteLength::Rems(rems(1.)));
        assert_eq!(lengths.definite, DefiniteLength::Fraction(0.5));
    }

    #[test]
    fn test_pixels_reject_rems() {
        let result = serde_json::from_str::<Lengths>(
            r#"{ "pixels": "1rem", "absolute": "1rem", "definite": "50%" }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_font_family_accepts_string_or_list() {
        #[derive(Deserialize)]
        struct Family {
            #[serde(deserialize_with = "de_string_or_non_empty_list")]
            family: SmallVec<[SharedString; 1]>,
        }

        let one: Family = serde_json::from_str(r#"{ "family": "Inter" }"#).unwrap();
        assert_eq!(one.family.len(), 1);

        let many: Family = serde_json::from_str(r#"{ "family": ["Inter", "Arial"] }"#).unwrap();
        assert_eq!(many.family.len(), 2);

        let empty = serde_json::from_str::<Family>(r#"{ "family": [] }"#);
        assert!(empty.is_err());
    }
}
