//! Detection of explicit state qualifiers in a free-text search query.
//!
//! Callers use this to decide whether a default `is:<state>` term may be
//! added to a user's query without contradicting what the user typed.
//!
//! The qualifier vocabulary is a fixed list. Anything outside it counts as
//! "no state clause", including qualifiers the provider may add later.

use std::iter::Peekable;
use std::str::Chars;

/// Exact tokens that express a state.
const STATE_KEYWORDS: &[&str] = &["is:open", "is:closed", "is:merged"];

/// Qualifier taking a single word naming the state, e.g. `state:merged`.
const STATE_QUALIFIER: &str = "state:";

/// Date qualifiers that imply a state, e.g. `merged:>2021-05-20`.
const DATED_STATE_QUALIFIERS: &[&str] = &["merged:", "closed:"];

/// Returns true if `query` already contains a state qualifier.
///
/// Conflicting qualifiers (`state:merged state:open`) still count: this is
/// detection, not validation. A query with an unterminated quote yields
/// `false`.
pub fn query_has_state_clause(query: &str) -> bool {
    let Some(tokens) = split_query(query) else {
        return false;
    };
    tokens.iter().any(|token| is_state_token(token))
}

fn is_state_token(token: &str) -> bool {
    if STATE_KEYWORDS.contains(&token) {
        return true;
    }
    if let Some(word) = token.strip_prefix(STATE_QUALIFIER) {
        return !word.is_empty() && word.chars().all(|c| c.is_ascii_alphanumeric());
    }
    DATED_STATE_QUALIFIERS.iter().any(|qualifier| {
        token
            .strip_prefix(qualifier)
            .and_then(|value| value.chars().next())
            .is_some_and(|first| matches!(first, '>' | '<' | '*') || first.is_ascii_digit())
    })
}

/// Splits a query on whitespace, keeping double-quoted spans inside one token.
///
/// Quotes are removed from the resulting tokens; a backslash inside double
/// quotes escapes the next character. Apostrophes are ordinary characters.
/// Returns `None` on an unterminated double quote.
fn split_query(query: &str) -> Option<Vec<String>> {
    let mut chars = query.chars().peekable();
    let mut tokens = Vec::new();

    loop {
        skip_whitespace(&mut chars);
        if chars.peek().is_none() {
            return Some(tokens);
        }
        tokens.push(read_token(&mut chars)?);
    }
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

fn read_token(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let mut token = String::new();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            break;
        }
        chars.next();
        match c {
            '"' => loop {
                match chars.next()? {
                    '"' => break,
                    '\\' => token.push(chars.next()?),
                    other => token.push(other),
                }
            },
            other => token.push(other),
        }
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_state_clauses() {
        for query in [
            "is:closed is:merged",
            "merged:>2021-05-20",
            "state:merged state:open",
            "assignee:g14a is:closed",
            "state:closed label:bug",
            "is:open",
            "closed:<=2020-01-01",
            "merged:2021-01-01..2021-02-01",
            "closed:*..2021-02-01",
        ] {
            assert!(query_has_state_clause(query), "expected state in {:?}", query);
        }
    }

    #[test]
    fn test_queries_without_state_clause() {
        for query in [
            "author:mislav",
            "assignee:g14a mentions:vilmibm",
            "",
            "   ",
            "is:issue is:pr",
            "state:",
            "merged:",
            "merged:yesterday",
            "-is:closed",
            "IS:CLOSED",
        ] {
            assert!(
                !query_has_state_clause(query),
                "expected no state in {:?}",
                query
            );
        }
    }

    #[test]
    fn test_quoted_value_is_one_token() {
        assert!(!query_has_state_clause(r#"label:"wontfix is:closed""#));
        assert!(query_has_state_clause(r#"label:"help wanted" is:closed"#));
    }

    #[test]
    fn test_unterminated_quote_is_not_a_state_clause() {
        assert!(!query_has_state_clause(r#"is:closed label:"oops"#));
    }

    #[test]
    fn test_split_query_handles_quotes_and_escapes() {
        assert_eq!(
            split_query(r#"a "b c" 'd e' "f \"g\"""#).unwrap(),
            vec!["a", "b c", "'d", "e'", r#"f "g""#]
        );
        assert_eq!(split_query("  ").unwrap(), Vec::<String>::new());
        assert_eq!(split_query("'open").unwrap(), vec!["'open"]);
    }

    #[test]
    fn test_apostrophe_does_not_hide_state_clause() {
        assert!(query_has_state_clause("label:don't is:closed"));
        assert!(query_has_state_clause("author:o'brien is:merged"));
        assert!(!query_has_state_clause("label:don't"));
    }
}
