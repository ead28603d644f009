//! Quoting of qualifier values inside a search query.

use std::borrow::Cow;

/// Quotes a qualifier value for the search syntax.
///
/// Values containing whitespace are wrapped in double quotes, with any
/// embedded double quote escaped by a backslash first. Anything else is
/// returned untouched.
pub(crate) fn quote_value(value: &str) -> Cow<'_, str> {
    if !value.chars().any(char::is_whitespace) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(format!("\"{}\"", value.replace('"', "\\\"")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_value_is_borrowed() {
        let quoted = quote_value("docs");
        assert_eq!(quoted, "docs");
        assert!(matches!(quoted, Cow::Borrowed(_)));
    }

    #[test]
    fn test_value_with_space_is_quoted() {
        assert_eq!(quote_value("help wanted"), "\"help wanted\"");
    }

    #[test]
    fn test_other_whitespace_triggers_quoting() {
        assert_eq!(quote_value("a\tb"), "\"a\tb\"");
        assert_eq!(quote_value("a\nb"), "\"a\nb\"");
    }

    #[test]
    fn test_embedded_quotes_are_escaped_before_quoting() {
        assert_eq!(
            quote_value(r#"Codename "What Was Missing""#),
            r#""Codename \"What Was Missing\"""#
        );
    }

    #[test]
    fn test_quote_without_whitespace_stays_bare() {
        assert_eq!(quote_value(r#"say"hi"#), r#"say"hi"#);
    }

    #[test]
    fn test_empty_value_stays_empty() {
        assert_eq!(quote_value(""), "");
    }
}
