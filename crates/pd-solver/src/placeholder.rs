//! Parser for loss-parameter text.
//!
//! A loss parameter written as text is either a numeric literal (`"0.5"`,
//! `"1e-3"`) or exactly one reference to a resolved geometry value,
//! `${geom.<key>}`, where the key is any text up to the closing brace.
//! Anything else is rejected.

use thiserror::Error;

/// Parsed loss-parameter text.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgTerm {
    Literal(f64),
    GeomRef(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaceholderError {
    #[error("unterminated placeholder '{0}'")]
    Unterminated(String),

    #[error("placeholder '{text}' uses namespace '{namespace}'; only 'geom' is available")]
    UnsupportedNamespace { text: String, namespace: String },

    #[error("placeholder '{text}' has invalid key '{key}'")]
    InvalidKey { text: String, key: String },

    #[error("'{0}' is neither a number nor a ${{geom.<key>}} reference")]
    NotAnArgument(String),
}

const OPEN: &str = "${";
const CLOSE: char = '}';
const GEOM_NAMESPACE: &str = "geom";

pub fn parse(text: &str) -> Result<ArgTerm, PlaceholderError> {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix(OPEN) else {
        return trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(ArgTerm::Literal)
            .ok_or_else(|| PlaceholderError::NotAnArgument(text.to_string()));
    };

    let inner = rest
        .strip_suffix(CLOSE)
        .ok_or_else(|| PlaceholderError::Unterminated(text.to_string()))?;

    let (namespace, key) = inner
        .split_once('.')
        .ok_or_else(|| PlaceholderError::UnsupportedNamespace {
            text: text.to_string(),
            namespace: String::new(),
        })?;

    if namespace != GEOM_NAMESPACE {
        return Err(PlaceholderError::UnsupportedNamespace {
            text: text.to_string(),
            namespace: namespace.to_string(),
        });
    }
    if !is_addressable_key(key) {
        return Err(PlaceholderError::InvalidKey {
            text: text.to_string(),
            key: key.to_string(),
        });
    }

    Ok(ArgTerm::GeomRef(key.to_string()))
}

/// Keys a placeholder can name: any non-empty text without the closing `}`.
pub fn is_addressable_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(CLOSE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_geometry_reference() {
        assert_eq!(
            parse("${geom.inlet_area}"),
            Ok(ArgTerm::GeomRef("inlet_area".into()))
        );
        assert_eq!(parse("  ${geom.D_h} "), Ok(ArgTerm::GeomRef("D_h".into())));
    }

    #[test]
    fn parses_numeric_literals() {
        assert_eq!(parse("0.5"), Ok(ArgTerm::Literal(0.5)));
        assert_eq!(parse("1e-3"), Ok(ArgTerm::Literal(1e-3)));
        assert!(matches!(parse("inf"), Err(PlaceholderError::NotAnArgument(_))));
    }

    #[test]
    fn rejects_malformed_references() {
        assert!(matches!(
            parse("${geom.inlet_area"),
            Err(PlaceholderError::Unterminated(_))
        ));
        assert!(matches!(
            parse("${loss.form}"),
            Err(PlaceholderError::UnsupportedNamespace { ref namespace, .. }) if namespace == "loss"
        ));
        assert!(matches!(
            parse("${inlet_area}"),
            Err(PlaceholderError::UnsupportedNamespace { .. })
        ));
        assert!(matches!(
            parse("${geom.}"),
            Err(PlaceholderError::InvalidKey { .. })
        ));
        assert!(matches!(
            parse("${geom.a}b}"),
            Err(PlaceholderError::InvalidKey { .. })
        ));
    }

    #[test]
    fn keys_may_contain_punctuation_and_spaces() {
        assert_eq!(
            parse("${geom.bevel-length}"),
            Ok(ArgTerm::GeomRef("bevel-length".into()))
        );
        assert_eq!(
            parse("${geom.inlet area}"),
            Ok(ArgTerm::GeomRef("inlet area".into()))
        );
        assert_eq!(parse("${geom.a.b}"), Ok(ArgTerm::GeomRef("a.b".into())));
    }

    #[test]
    fn bare_key_names_are_not_references() {
        assert_eq!(
            parse("inlet_area"),
            Err(PlaceholderError::NotAnArgument("inlet_area".into()))
        );
        assert!(matches!(
            parse("2 * ${geom.a}"),
            Err(PlaceholderError::NotAnArgument(_))
        ));
    }

    #[test]
    fn addressable_keys() {
        assert!(is_addressable_key("outlet_area"));
        assert!(is_addressable_key("bevel-length"));
        assert!(is_addressable_key("a b"));
        assert!(!is_addressable_key(""));
        assert!(!is_addressable_key("a}"));
    }
}
