//! Merging parameters into the query string of a base URL.

use std::collections::BTreeMap;

use url::form_urlencoded;
use url::{ParseError, Url};

use crate::error::{QueryError, QueryResult};

/// Query parameters keyed by name, each holding its values in order.
///
/// Serialization walks keys in sorted order so the same input always
/// produces the same string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct QueryParams {
    params: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    /// Parses an `application/x-www-form-urlencoded` query string.
    pub(crate) fn parse(query: &str) -> Self {
        let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            params
                .entry(key.into_owned())
                .or_default()
                .push(value.into_owned());
        }
        Self { params }
    }

    /// Replaces every value of `key` with `value`.
    pub(crate) fn set(&mut self, key: &str, value: impl Into<String>) {
        self.params.insert(key.to_string(), vec![value.into()]);
    }

    #[cfg(test)]
    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Encodes the parameters, keys sorted.
    pub(crate) fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.params {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}

/// A base URL split into its query parameters and everything else.
///
/// The base may be an absolute URL, a relative reference such as
/// `/path?x=1`, or empty. A fragment is kept after the query.
#[derive(Debug, Clone)]
pub(crate) struct UrlWithQuery {
    target: Target,
    params: QueryParams,
}

#[derive(Debug, Clone)]
enum Target {
    Absolute(Url),
    Relative {
        path: String,
        fragment: Option<String>,
    },
}

impl UrlWithQuery {
    /// Parses `base`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MalformedUrl`] when `base` looks absolute but
    /// does not parse.
    pub(crate) fn parse(base: &str) -> QueryResult<Self> {
        match Url::parse(base) {
            Ok(url) => {
                let params = QueryParams::parse(url.query().unwrap_or(""));
                Ok(Self {
                    target: Target::Absolute(url),
                    params,
                })
            }
            Err(ParseError::RelativeUrlWithoutBase) => {
                let (rest, fragment) = match base.split_once('#') {
                    Some((rest, fragment)) => (rest, Some(fragment.to_string())),
                    None => (base, None),
                };
                let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
                Ok(Self {
                    target: Target::Relative {
                        path: path.to_string(),
                        fragment,
                    },
                    params: QueryParams::parse(query),
                })
            }
            Err(source) => Err(QueryError::malformed_url(base, source)),
        }
    }

    pub(crate) fn params_mut(&mut self) -> &mut QueryParams {
        &mut self.params
    }

    /// Rebuilds the URL with the current parameters.
    pub(crate) fn finish(self) -> String {
        let encoded = self.params.encode();
        match self.target {
            Target::Absolute(mut url) => {
                url.set_query(Some(&encoded));
                url.into()
            }
            Target::Relative { path, fragment } => {
                let mut merged = format!("{}?{}", path, encoded);
                if let Some(fragment) = fragment {
                    merged.push('#');
                    merged.push_str(&fragment);
                }
                merged
            }
        }
    }
}

/// Parses the query of `base`, lets `apply` modify it, and rebuilds the URL.
pub(crate) fn merge_query<F>(base: &str, apply: F) -> QueryResult<String>
where
    F: FnOnce(&mut QueryParams),
{
    let mut url = UrlWithQuery::parse(base)?;
    apply(url.params_mut());
    Ok(url.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_encode_sorts_keys() {
        let params = QueryParams::parse("z=1&a=2&m=3");
        assert_eq!(params.encode(), "a=2&m=3&z=1");
    }

    #[test]
    fn test_repeated_keys_keep_value_order() {
        let params = QueryParams::parse("label=b&label=a");
        assert_eq!(params.encode(), "label=b&label=a");
    }

    #[test]
    fn test_set_replaces_all_values() {
        let mut params = QueryParams::parse("q=old&q=older&x=1");
        params.set("q", "new");
        assert_eq!(params.get("q"), Some("new"));
        assert_eq!(params.encode(), "q=new&x=1");
    }

    #[test]
    fn test_encode_uses_form_encoding() {
        let mut params = QueryParams::default();
        params.set("q", "is:issue label:\"a b\"");
        assert_eq!(params.encode(), "q=is%3Aissue+label%3A%22a+b%22");
    }

    #[test]
    fn test_merge_into_absolute_url() {
        let merged = merge_query("https://example.com/path?a=b", |p| p.set("q", "x")).unwrap();
        assert_eq!(merged, "https://example.com/path?a=b&q=x");
    }

    #[test]
    fn test_merge_into_blank_base() {
        let merged = merge_query("", |p| p.set("body", "")).unwrap();
        assert_eq!(merged, "?body=");
    }

    #[test]
    fn test_merge_into_relative_reference_keeps_fragment() {
        let merged = merge_query("/issues?b=2#top", |p| p.set("a", "1")).unwrap();
        assert_eq!(merged, "/issues?a=1&b=2#top");
    }

    #[test]
    fn test_merge_rejects_malformed_url() {
        let err = merge_query("http://[::1/path", |p| p.set("q", "x")).unwrap_err();
        assert!(matches!(err, QueryError::MalformedUrl { .. }));
        assert!(err.to_string().contains("http://[::1/path"));
    }
}
