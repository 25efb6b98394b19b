//! Textual configuration of the unit kind.
//!
//! The only knob the codec exposes is which framing a buffer uses and, for
//! sub-elements, which continuation identifier marks their fragments. This
//! module parses those settings from strings such as `element` or
//! `subelement:254`. It has no crate-internal dependencies so the build
//! script can reuse it when rendering the manual page.

use std::{num::ParseIntError, str::FromStr};

use thiserror::Error;

/// Unit kind as written on the command line or in caller configuration.
///
/// # Examples
///
/// ```
/// use elemfrag::config::KindArg;
///
/// let kind: KindArg = "subelement:0xfe".parse().unwrap();
/// assert_eq!(kind, KindArg::Subelement { fragment_id: 254 });
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KindArg {
    /// Top-level elements, fragmented with the standard fragment element.
    #[default]
    Element,
    /// Sub-elements, fragmented with the given continuation identifier.
    Subelement { fragment_id: u8 },
}

/// Errors raised while parsing configuration values.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The kind is neither `element` nor `subelement:<id>`.
    #[error("unknown unit kind `{0}`; expected `element` or `subelement:<id>`")]
    UnknownKind(String),
    /// A sub-element kind was given without its fragment identifier.
    #[error("`subelement` requires a fragment identifier, e.g. `subelement:254`")]
    MissingFragmentId,
    /// An identifier is not a number in `0..=255`.
    #[error("invalid octet `{value}`: {source}")]
    InvalidOctet {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl FromStr for KindArg {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once(':') {
            None if s.eq_ignore_ascii_case("element") => Ok(Self::Element),
            None if s.eq_ignore_ascii_case("subelement") => Err(ConfigError::MissingFragmentId),
            Some((name, id)) if name.eq_ignore_ascii_case("subelement") => Ok(Self::Subelement {
                fragment_id: parse_octet(id)?,
            }),
            _ => Err(ConfigError::UnknownKind(s.to_owned())),
        }
    }
}

/// Parse an identifier octet written in decimal or with a `0x` prefix.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidOctet`] when `value` is not a number that
/// fits in a byte.
pub fn parse_octet(value: &str) -> Result<u8, ConfigError> {
    let trimmed = value.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex_digits) => u8::from_str_radix(hex_digits, 16),
        None => trimmed.parse::<u8>(),
    };
    parsed.map_err(|source| ConfigError::InvalidOctet {
        value: value.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("element", KindArg::Element)]
    #[case("Element", KindArg::Element)]
    #[case("subelement:254", KindArg::Subelement { fragment_id: 254 })]
    #[case("subelement:0x10", KindArg::Subelement { fragment_id: 16 })]
    fn parses_kinds(#[case] input: &str, #[case] expected: KindArg) {
        assert_eq!(input.parse::<KindArg>(), Ok(expected));
    }

    #[test]
    fn subelement_requires_fragment_id() {
        assert_eq!(
            "subelement".parse::<KindArg>(),
            Err(ConfigError::MissingFragmentId)
        );
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(matches!(
            "vendor".parse::<KindArg>(),
            Err(ConfigError::UnknownKind(kind)) if kind == "vendor"
        ));
    }

    #[test]
    fn rejects_out_of_range_octet() {
        assert!(matches!(
            parse_octet("256"),
            Err(ConfigError::InvalidOctet { .. })
        ));
    }
}
